//! Visitor logging, IP blocklist and Telegram admin registry.
//!
//! Every request under `/api/` (except `/api/health`) is checked against the
//! `blocked_ips` table before it reaches a handler.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

pub mod api;
pub mod client_ip;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod seed;

/// Process-wide resources handed to every request.
#[derive(Clone, Debug)]
pub struct AppResources {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
}
