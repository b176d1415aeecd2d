//! Shared fixtures: an in-memory SQLite database migrated with the real
//! migrator, wrapped in `AppResources`.

#![allow(dead_code)]

use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use visitwatch::{AppResources, api, config::AppConfig};

/// Create a migrated test database connection
pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");
    db
}

/// Create a test config
pub fn create_test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        cors_origins: "*".into(),
        listen_address: "127.0.0.1:0".into(),
    }
}

/// Create test AppResources
pub async fn create_test_resources() -> AppResources {
    AppResources {
        db: Arc::new(create_test_db().await),
        config: Arc::new(create_test_config()),
    }
}

/// Full application router, guard included, over a fresh database.
pub async fn create_test_server() -> (TestServer, AppResources) {
    let resources = create_test_resources().await;
    let app = api::router(resources.clone());
    let server = TestServer::new(app).expect("create test server");
    (server, resources)
}
