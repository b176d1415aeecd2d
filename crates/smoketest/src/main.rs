use smoketest::{DEFAULT_BASE_URL, SmokeTester};
use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smoketest=info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();

    let base_url = env::var("BASE_URL").unwrap_or_else(|_| {
        tracing::info!("No BASE_URL environment variable set, defaulting to {DEFAULT_BASE_URL}");
        DEFAULT_BASE_URL.to_string()
    });

    let mut tester = SmokeTester::new(base_url);
    let summary = tester.run_all().await;

    tracing::info!(passed = summary.passed, run = summary.run, "Final results");
    if !summary.all_passed() {
        for outcome in tester.outcomes().iter().filter(|o| !o.passed) {
            tracing::warn!(check = outcome.name, status = ?outcome.status, "Failed");
        }
        tracing::error!(failed = summary.failed(), "Smoke test failed");
        std::process::exit(1);
    }

    tracing::info!("All checks passed");
    Ok(())
}
