use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlockedIps::Table)
                    .if_not_exists()
                    .col(pk_auto(BlockedIps::Id))
                    .col(string(BlockedIps::IpAddress).unique_key().to_owned())
                    .col(
                        timestamp_with_time_zone(BlockedIps::BlockedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(string(BlockedIps::Reason).default("Blocked by admin"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlockedIps::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BlockedIps {
    Table,
    Id,
    IpAddress,
    BlockedAt,
    Reason,
}
