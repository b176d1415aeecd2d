use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use visitwatch::AppResources;
use visitwatch::api::start_webserver;
use visitwatch::config::load_config_or_panic;
use visitwatch::database;
use visitwatch::seed::seed_default_admins;

fn initialize_tracing() {
    let default_directives = "visitwatch=info,tower_http=info,sea_orm=warn";
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer().with_target(true).with_level(true);

    registry.with(layer).init();
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;
    initialize_tracing();

    // A missing .env is fine; the process environment still applies.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let config = Arc::new(load_config_or_panic());

    let db = database::connect(&config).await?;
    database::run_migrations(&db).await?;

    // Not fatal: the API works without the default admins.
    if let Err(e) = seed_default_admins(&db).await {
        tracing::error!(
            name = "startup.seed_failed",
            error = ?e,
            message = "Failed to seed default admins"
        );
    }

    let resources = AppResources {
        db: Arc::new(db),
        config,
    };
    tracing::info!(cors_origins = %resources.config.cors_origins, "CORS configuration");

    start_webserver(resources).await?;
    Ok(())
}
