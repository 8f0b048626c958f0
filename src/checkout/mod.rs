//! Guest checkout workflow.
//!
//! Seven GraphQL calls in a fixed order, each one depending on the cart id
//! from the first:
//!
//! ```text
//! createEmptyCart -> addBundleProductsToCart -> addresses -> shipping method
//!     -> guest email -> payment method -> placeOrder
//! ```
//!
//! The first failing stage stops the pipeline. The cart is left as it is;
//! nothing is rolled back.

mod queries;
pub mod responses;

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::config::{AddressConfig, CheckoutConfig};
use crate::platform::{GraphqlClient, PlatformError};
use responses::{
    AddBundleData, CartItem, CreateEmptyCartData, PlaceOrderData, SelectedPaymentMethod,
    SetAddressesData, SetGuestEmailData, SetPaymentMethodData, SetShippingMethodData,
    ShippingAddressMethod,
};

/// Checkout pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckoutStage {
    CreateCart,
    AddBundleProduct,
    SetAddresses,
    SetShippingMethod,
    SetGuestEmail,
    SetPaymentMethod,
    PlaceOrder,
}

impl CheckoutStage {
    /// 1-based step number.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn description(&self) -> &'static str {
        match self {
            CheckoutStage::CreateCart => "Creating a cart",
            CheckoutStage::AddBundleProduct => "Adding bundle product to cart",
            CheckoutStage::SetAddresses => "Setting addresses",
            CheckoutStage::SetShippingMethod => "Setting shipping method",
            CheckoutStage::SetGuestEmail => "Setting guest email",
            CheckoutStage::SetPaymentMethod => "Setting payment method",
            CheckoutStage::PlaceOrder => "Placing the order",
        }
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.number(), self.description())
    }
}

/// A stage failed; later stages were not run.
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed: {source}")]
pub struct CheckoutError {
    pub stage: CheckoutStage,
    #[source]
    pub source: PlatformError,
}

/// Outcome of a completed checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    pub cart_id: String,
    pub items: Vec<CartItem>,
    pub order_number: String,
}

/// Runs the checkout stages against one GraphQL endpoint.
pub struct CheckoutDriver {
    client: GraphqlClient,
    config: CheckoutConfig,
}

impl CheckoutDriver {
    pub fn new(client: GraphqlClient, config: CheckoutConfig) -> Self {
        Self { client, config }
    }

    /// Run every stage in order and return the order number.
    pub async fn run(&self) -> Result<CheckoutOutcome, CheckoutError> {
        match self.run_stages().await {
            Ok(outcome) => {
                info!(
                    order_number = %outcome.order_number,
                    "Order placed successfully"
                );
                Ok(outcome)
            }
            Err(e) => {
                error!(stage = %e.stage, error = %e.source, "Error placing bundle order");
                Err(e)
            }
        }
    }

    async fn run_stages(&self) -> Result<CheckoutOutcome, CheckoutError> {
        let cart_id = self.create_cart().await?;
        info!(cart_id = %cart_id, "Cart ID");

        let items = self.add_bundle_product(&cart_id).await?;
        info!(items = ?items, "Cart Items");

        self.set_addresses(&cart_id).await?;
        self.set_shipping_method(&cart_id).await?;
        self.set_guest_email(&cart_id).await?;
        self.set_payment_method(&cart_id).await?;
        let order_number = self.place_order(&cart_id).await?;

        Ok(CheckoutOutcome {
            cart_id,
            items,
            order_number,
        })
    }

    /// Stage 1: create an empty guest cart.
    pub async fn create_cart(&self) -> Result<String, CheckoutError> {
        let data: CreateEmptyCartData = self
            .stage(CheckoutStage::CreateCart, queries::CREATE_EMPTY_CART, json!({}))
            .await?;
        non_empty(CheckoutStage::CreateCart, data.create_empty_cart, "cart id")
    }

    /// Stage 2: add the configured bundle product.
    pub async fn add_bundle_product(&self, cart_id: &str) -> Result<Vec<CartItem>, CheckoutError> {
        let data: AddBundleData = self
            .stage(
                CheckoutStage::AddBundleProduct,
                queries::ADD_BUNDLE_PRODUCTS_TO_CART,
                add_bundle_variables(cart_id, &self.config),
            )
            .await?;
        Ok(data.add_bundle_products_to_cart.cart.items)
    }

    /// Stage 3: billing and shipping address in one request.
    pub async fn set_addresses(&self, cart_id: &str) -> Result<SetAddressesData, CheckoutError> {
        self.stage(
            CheckoutStage::SetAddresses,
            queries::SET_ADDRESSES,
            address_variables(cart_id, &self.config.address),
        )
        .await
    }

    /// Stage 4: carrier and method.
    pub async fn set_shipping_method(
        &self,
        cart_id: &str,
    ) -> Result<Vec<ShippingAddressMethod>, CheckoutError> {
        let data: SetShippingMethodData = self
            .stage(
                CheckoutStage::SetShippingMethod,
                queries::SET_SHIPPING_METHOD,
                json!({
                    "input": {
                        "cart_id": cart_id,
                        "shipping_methods": [{
                            "carrier_code": self.config.carrier_code,
                            "method_code": self.config.method_code,
                        }]
                    }
                }),
            )
            .await?;
        Ok(data.set_shipping_methods_on_cart.cart.shipping_addresses)
    }

    /// Stage 5: guest email.
    pub async fn set_guest_email(&self, cart_id: &str) -> Result<Option<String>, CheckoutError> {
        let data: SetGuestEmailData = self
            .stage(
                CheckoutStage::SetGuestEmail,
                queries::SET_GUEST_EMAIL,
                json!({
                    "input": {
                        "cart_id": cart_id,
                        "email": self.config.guest_email,
                    }
                }),
            )
            .await?;
        Ok(data.set_guest_email_on_cart.cart.email)
    }

    /// Stage 6: offline payment method.
    pub async fn set_payment_method(
        &self,
        cart_id: &str,
    ) -> Result<SelectedPaymentMethod, CheckoutError> {
        let data: SetPaymentMethodData = self
            .stage(
                CheckoutStage::SetPaymentMethod,
                queries::SET_PAYMENT_METHOD,
                json!({
                    "input": {
                        "cart_id": cart_id,
                        "payment_method": {"code": self.config.payment_method},
                    }
                }),
            )
            .await?;
        Ok(data.set_payment_method_on_cart.cart.selected_payment_method)
    }

    /// Stage 7: place the order.
    pub async fn place_order(&self, cart_id: &str) -> Result<String, CheckoutError> {
        let data: PlaceOrderData = self
            .stage(
                CheckoutStage::PlaceOrder,
                queries::PLACE_ORDER,
                json!({"input": {"cart_id": cart_id}}),
            )
            .await?;
        non_empty(
            CheckoutStage::PlaceOrder,
            data.place_order.order.order_number,
            "order number",
        )
    }

    async fn stage<T: DeserializeOwned>(
        &self,
        stage: CheckoutStage,
        query: &str,
        variables: Value,
    ) -> Result<T, CheckoutError> {
        info!("{}...", stage);
        self.client
            .request(query, &variables)
            .await
            .map_err(|source| CheckoutError { stage, source })
    }
}

fn non_empty(stage: CheckoutStage, value: String, what: &str) -> Result<String, CheckoutError> {
    if value.trim().is_empty() {
        return Err(CheckoutError {
            stage,
            source: PlatformError::Graphql(format!("empty {} in response", what)),
        });
    }
    Ok(value)
}

fn add_bundle_variables(cart_id: &str, config: &CheckoutConfig) -> Value {
    json!({
        "input": {
            "cart_id": cart_id,
            "cart_items": [{
                "data": {
                    "sku": config.bundle_sku,
                    "quantity": config.quantity,
                },
                "bundle_options": [{
                    "id": config.bundle_option_id,
                    "quantity": config.bundle_option_quantity,
                    "value": [config.bundle_option_value],
                }]
            }]
        }
    })
}

fn address_input(address: &AddressConfig) -> Value {
    json!({
        "firstname": address.firstname,
        "lastname": address.lastname,
        "street": address.street,
        "city": address.city,
        "region": address.region,
        "postcode": address.postcode,
        "country_code": address.country_code,
        "telephone": address.telephone,
    })
}

fn address_variables(cart_id: &str, address: &AddressConfig) -> Value {
    json!({
        "billing": {
            "cart_id": cart_id,
            "billing_address": {"address": address_input(address)},
        },
        "shipping": {
            "cart_id": cart_id,
            "shipping_addresses": [{"address": address_input(address)}],
        }
    })
}
