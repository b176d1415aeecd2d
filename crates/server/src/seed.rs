//! One-time bootstrap of the admin table.

use sea_orm::{
    ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, TransactionTrait,
};
use time::OffsetDateTime;

use crate::entity::telegram_admin;

/// `(name, telegram_id)` pairs inserted into an empty admin table.
pub const DEFAULT_ADMINS: [(&str, &str); 2] =
    [("Главный Админ", "123456789"), ("Модератор", "987654321")];

/// Insert [`DEFAULT_ADMINS`] if the admin table has no rows at all.
///
/// Returns the number of rows inserted. Once any admin exists this is a no-op,
/// even if the defaults were later deleted.
#[tracing::instrument(skip(db))]
pub async fn seed_default_admins(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let txn = db.begin().await?;

    let existing = telegram_admin::Entity::find().count(&txn).await?;
    if existing > 0 {
        tracing::debug!(existing, "Admin table already populated, skipping seed");
        return Ok(0);
    }

    let now = OffsetDateTime::now_utc();
    let rows = DEFAULT_ADMINS
        .into_iter()
        .map(|(name, telegram_id)| telegram_admin::ActiveModel {
            name: Set(name.to_string()),
            telegram_id: Set(telegram_id.to_string()),
            created_at: Set(now),
            is_active: Set(true),
            ..Default::default()
        });
    telegram_admin::Entity::insert_many(rows).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(count = DEFAULT_ADMINS.len(), "Default admins created");
    Ok(DEFAULT_ADMINS.len())
}
