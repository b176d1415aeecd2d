use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Visitor log: one row per `log-visit` call, never updated.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(pk_auto(Visits::Id))
                    .col(string(Visits::IpAddress))
                    .col(
                        timestamp_with_time_zone(Visits::Timestamp)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(text(Visits::UserAgent))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_visits_ip_address")
                    .table(Visits::Table)
                    .col(Visits::IpAddress)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_visits_timestamp")
                    .table(Visits::Table)
                    .col(Visits::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Visits {
    Table,
    Id,
    IpAddress,
    Timestamp,
    UserAgent,
}
