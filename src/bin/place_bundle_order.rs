//! place-bundle-order: guest checkout of one bundle product
//!
//! Runs the storefront GraphQL checkout for `bundle-product-1`, from empty
//! cart to placed order, and logs the order number. Stops at the first
//! failing step.
//!
//! ## Configuration
//! - BASE_URL (required)
//! - FIXTURES__CHECKOUT__*: overrides for the cart, address and method values
//! - FIXTURES__CHECKOUT__DEBUG_COOKIE: cookie sent with each request
//!   (empty disables it)
//! - `--config <path>`: YAML file layered over `fixtures.yaml`

use std::process::ExitCode;

use tracing::info;

use commerce_fixtures::checkout::CheckoutDriver;
use commerce_fixtures::config::Config;
use commerce_fixtures::platform::{self, GraphqlClient};
use commerce_fixtures::utils::bootstrap::{exit_code, init_tracing, parse_config_path};

const SCRIPT: &str = "place-bundle-order";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    exit_code(SCRIPT, run().await)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(parse_config_path().as_deref())?;
    let platform_config = config.platform()?;

    let client = platform::http_client(&platform_config)?;
    let graphql = GraphqlClient::new(client, &platform_config)
        .with_cookie(config.checkout.debug_cookie.clone());
    info!(endpoint = %graphql.endpoint(), "Placing bundle order");

    let outcome = CheckoutDriver::new(graphql, config.checkout).run().await?;
    info!(
        cart_id = %outcome.cart_id,
        order_number = %outcome.order_number,
        "{} finished",
        SCRIPT
    );
    Ok(())
}
