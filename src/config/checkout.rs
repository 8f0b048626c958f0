//! Checkout workflow configuration.
//!
//! Every value the GraphQL checkout sends is fixed test data. The defaults
//! reproduce the standard fixture: one `bundle-product-1`, a Los Angeles
//! address, flat-rate shipping and check/money-order payment.

use serde::Deserialize;

/// Postal address used for both billing and shipping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AddressConfig {
    pub firstname: String,
    pub lastname: String,
    pub street: Vec<String>,
    pub city: String,
    pub region: String,
    pub postcode: String,
    pub country_code: String,
    pub telephone: String,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            street: vec!["123 Main Street".to_string()],
            city: "Los Angeles".to_string(),
            region: "CA".to_string(),
            postcode: "90001".to_string(),
            country_code: "US".to_string(),
            telephone: "1234567890".to_string(),
        }
    }
}

/// Fixed inputs for the seven checkout stages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Bundle product added to the cart.
    pub bundle_sku: String,
    /// Quantity of the bundle.
    pub quantity: f64,
    /// Bundle option id selected.
    pub bundle_option_id: u32,
    /// Option selection value (the selection id).
    pub bundle_option_value: String,
    /// Quantity of the selected option.
    pub bundle_option_quantity: f64,
    /// Billing and shipping address.
    pub address: AddressConfig,
    /// Shipping carrier code.
    pub carrier_code: String,
    /// Shipping method code.
    pub method_code: String,
    /// Guest email set on the cart.
    pub guest_email: String,
    /// Offline payment method code.
    pub payment_method: String,
    /// Cookie header sent with every GraphQL request so a server-side
    /// debugger can attach. Empty disables the header.
    pub debug_cookie: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            bundle_sku: "bundle-product-1".to_string(),
            quantity: 1.0,
            bundle_option_id: 2,
            bundle_option_value: "2".to_string(),
            bundle_option_quantity: 1.0,
            address: AddressConfig::default(),
            carrier_code: "flatrate".to_string(),
            method_code: "flatrate".to_string(),
            guest_email: "guest@example.com".to_string(),
            payment_method: "checkmo".to_string(),
            debug_cookie: "XDEBUG_SESSION=PHPSTORM".to_string(),
        }
    }
}
