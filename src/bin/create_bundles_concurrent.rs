//! create-bundles-concurrent: bulk bundle products
//!
//! Exchanges the admin credentials for a token, creates the shared simple
//! product, then 20000 disabled bundles with at most 100 requests in flight.
//! A failed product is logged and counted; the run carries on.
//!
//! ## Configuration
//! - BASE_URL, ADMIN_USERNAME, ADMIN_PASSWORD (required)
//! - FIXTURES__BULK__COUNT: number of bundles
//! - FIXTURES__BULK__CONCURRENCY: requests in flight
//! - `--config <path>`: YAML file layered over `fixtures.yaml`

use std::process::ExitCode;

use tracing::info;

use commerce_fixtures::catalog::{BulkCreator, BulkVariant};
use commerce_fixtures::config::Config;
use commerce_fixtures::platform::{self, fetch_admin_token, CatalogClient};
use commerce_fixtures::utils::bootstrap::{exit_code, init_tracing, parse_config_path};

const SCRIPT: &str = "create-bundles-concurrent";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    exit_code(SCRIPT, run().await)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(parse_config_path().as_deref())?;
    let platform_config = config.admin_platform()?;
    let plan = BulkVariant::ConcurrentDisabled.plan().with_overrides(&config.bulk);

    let client = platform::http_client(&platform_config)?;
    let token = fetch_admin_token(&client, &platform_config).await?;

    let catalog = CatalogClient::new(client, platform_config, token);
    info!(
        variant = BulkVariant::ConcurrentDisabled.name(),
        count = plan.count,
        "Creating bundle products"
    );
    let report = BulkCreator::new(&catalog).run(&plan).await;
    info!(
        attempted = report.attempted(),
        failed = report.failed(),
        "{} finished",
        SCRIPT
    );
    Ok(())
}
