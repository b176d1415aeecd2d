use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Telegram administrators. `is_active` exists for a future deactivate
/// operation; nothing flips it yet.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TelegramAdmins::Table)
                    .if_not_exists()
                    .col(pk_auto(TelegramAdmins::Id))
                    .col(string(TelegramAdmins::Name))
                    .col(string(TelegramAdmins::TelegramId).unique_key().to_owned())
                    .col(
                        timestamp_with_time_zone(TelegramAdmins::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(boolean(TelegramAdmins::IsActive).default(true))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_telegram_admins_name")
                    .table(TelegramAdmins::Table)
                    .col(TelegramAdmins::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TelegramAdmins::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TelegramAdmins {
    Table,
    Id,
    Name,
    TelegramId,
    CreatedAt,
    IsActive,
}
