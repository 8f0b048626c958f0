//! Typed `data` payloads for each checkout mutation.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateEmptyCartData {
    #[serde(rename = "createEmptyCart")]
    pub create_empty_cart: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartProduct {
    pub name: Option<String>,
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub product: CartProduct,
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct CartItems {
    pub items: Vec<CartItem>,
}

#[derive(Debug, Deserialize)]
pub struct CartItemsWrapper {
    pub cart: CartItems,
}

#[derive(Debug, Deserialize)]
pub struct AddBundleData {
    #[serde(rename = "addBundleProductsToCart")]
    pub add_bundle_products_to_cart: CartItemsWrapper,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressName {
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Deserialize)]
pub struct BillingCart {
    pub billing_address: Option<AddressName>,
}

#[derive(Debug, Deserialize)]
pub struct BillingWrapper {
    pub cart: BillingCart,
}

#[derive(Debug, Deserialize)]
pub struct ShippingAddressesCart {
    pub shipping_addresses: Vec<AddressName>,
}

#[derive(Debug, Deserialize)]
pub struct ShippingAddressesWrapper {
    pub cart: ShippingAddressesCart,
}

#[derive(Debug, Deserialize)]
pub struct SetAddressesData {
    #[serde(rename = "setBillingAddressOnCart")]
    pub billing: BillingWrapper,
    #[serde(rename = "setShippingAddressesOnCart")]
    pub shipping: ShippingAddressesWrapper,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectedShippingMethod {
    pub carrier_code: String,
    pub method_code: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShippingAddressMethod {
    pub selected_shipping_method: Option<SelectedShippingMethod>,
}

#[derive(Debug, Deserialize)]
pub struct ShippingMethodCart {
    pub shipping_addresses: Vec<ShippingAddressMethod>,
}

#[derive(Debug, Deserialize)]
pub struct ShippingMethodWrapper {
    pub cart: ShippingMethodCart,
}

#[derive(Debug, Deserialize)]
pub struct SetShippingMethodData {
    #[serde(rename = "setShippingMethodsOnCart")]
    pub set_shipping_methods_on_cart: ShippingMethodWrapper,
}

#[derive(Debug, Deserialize)]
pub struct EmailCart {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailWrapper {
    pub cart: EmailCart,
}

#[derive(Debug, Deserialize)]
pub struct SetGuestEmailData {
    #[serde(rename = "setGuestEmailOnCart")]
    pub set_guest_email_on_cart: EmailWrapper,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectedPaymentMethod {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentCart {
    pub selected_payment_method: SelectedPaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct PaymentWrapper {
    pub cart: PaymentCart,
}

#[derive(Debug, Deserialize)]
pub struct SetPaymentMethodData {
    #[serde(rename = "setPaymentMethodOnCart")]
    pub set_payment_method_on_cart: PaymentWrapper,
}

#[derive(Debug, Deserialize)]
pub struct PlacedOrder {
    pub order_number: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderWrapper {
    pub order: PlacedOrder,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderData {
    #[serde(rename = "placeOrder")]
    pub place_order: PlaceOrderWrapper,
}
