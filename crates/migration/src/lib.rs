pub use sea_orm_migration::prelude::*;

mod m20241101_120000_add_visits_table;
mod m20241101_120100_add_blocked_ips_table;
mod m20241101_120200_add_telegram_admins_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241101_120000_add_visits_table::Migration),
            Box::new(m20241101_120100_add_blocked_ips_table::Migration),
            Box::new(m20241101_120200_add_telegram_admins_table::Migration),
        ]
    }
}
