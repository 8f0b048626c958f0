//! GraphQL documents for the guest checkout.
//!
//! Inputs travel as variables so the fixed test values live in
//! `CheckoutConfig` rather than in the documents.

pub const CREATE_EMPTY_CART: &str = r#"
mutation {
  createEmptyCart
}
"#;

pub const ADD_BUNDLE_PRODUCTS_TO_CART: &str = r#"
mutation AddBundleToCart($input: AddBundleProductsToCartInput!) {
  addBundleProductsToCart(input: $input) {
    cart {
      items {
        id
        product {
          name
          sku
        }
        quantity
      }
    }
  }
}
"#;

pub const SET_ADDRESSES: &str = r#"
mutation SetAddresses(
  $billing: SetBillingAddressOnCartInput!
  $shipping: SetShippingAddressesOnCartInput!
) {
  setBillingAddressOnCart(input: $billing) {
    cart {
      billing_address {
        firstname
        lastname
      }
    }
  }
  setShippingAddressesOnCart(input: $shipping) {
    cart {
      shipping_addresses {
        firstname
        lastname
      }
    }
  }
}
"#;

pub const SET_SHIPPING_METHOD: &str = r#"
mutation SetShippingMethod($input: SetShippingMethodsOnCartInput!) {
  setShippingMethodsOnCart(input: $input) {
    cart {
      shipping_addresses {
        selected_shipping_method {
          carrier_code
          method_code
        }
      }
    }
  }
}
"#;

pub const SET_GUEST_EMAIL: &str = r#"
mutation SetEmail($input: SetGuestEmailOnCartInput!) {
  setGuestEmailOnCart(input: $input) {
    cart {
      email
    }
  }
}
"#;

pub const SET_PAYMENT_METHOD: &str = r#"
mutation PaymentMethod($input: SetPaymentMethodOnCartInput!) {
  setPaymentMethodOnCart(input: $input) {
    cart {
      selected_payment_method {
        code
      }
    }
  }
}
"#;

pub const PLACE_ORDER: &str = r#"
mutation PlaceOrder($input: PlaceOrderInput!) {
  placeOrder(input: $input) {
    order {
      order_number
    }
  }
}
"#;
