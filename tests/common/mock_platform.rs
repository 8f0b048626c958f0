//! In-process mock of the commerce platform.
//!
//! Serves the admin token endpoint, product create/read over REST and the
//! guest checkout mutations over GraphQL on a random local port. Products are
//! kept in memory; GraphQL calls are recorded in arrival order so tests can
//! assert which checkout steps ran.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_TOKEN: &str = "mock-admin-token-0123456789";
pub const CART_ID: &str = "mVgo3FZ0Nxg4w2SCeI5n4Rzd8vAFhX2D";
pub const ORDER_NUMBER: &str = "000000042";

/// Mutation names in the order the checkout issues them.
///
/// The address step issues both billing and shipping mutations in one
/// document and is recorded under the billing name.
pub const CHECKOUT_OPERATIONS: [&str; 7] = [
    "createEmptyCart",
    "addBundleProductsToCart",
    "setBillingAddressOnCart",
    "setShippingMethodsOnCart",
    "setGuestEmailOnCart",
    "setPaymentMethodOnCart",
    "placeOrder",
];

/// How a configured GraphQL operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphqlFailure {
    /// HTTP 200 with an `errors` array.
    Errors,
    /// HTTP 500.
    Http,
}

#[derive(Debug, Clone)]
struct StoredProduct {
    record: Value,
    request: Value,
}

#[derive(Debug, Clone)]
pub struct GraphqlCall {
    pub operation: String,
    pub variables: Value,
    pub cookie: Option<String>,
}

#[derive(Default)]
struct PlatformState {
    products: RwLock<HashMap<String, StoredProduct>>,
    rejected_skus: RwLock<HashSet<String>>,
    product_posts: AtomicUsize,
    next_id: AtomicI64,
    graphql_calls: RwLock<Vec<GraphqlCall>>,
    failure: RwLock<Option<(String, GraphqlFailure)>>,
}

type SharedState = Arc<PlatformState>;

/// Mock platform running on a random available port.
pub struct MockPlatform {
    state: SharedState,
    /// Server handle (kept alive to prevent shutdown)
    _handle: JoinHandle<()>,
    addr: SocketAddr,
}

impl MockPlatform {
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(PlatformState::default());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock platform");
        let addr = listener.local_addr().expect("Failed to get local address");

        let app = Router::new()
            .route("/rest/V1/integration/admin/token", post(handle_token))
            .route("/rest/V1/products", post(handle_create_product))
            .route("/rest/V1/products/:sku", get(handle_get_product))
            .route("/graphql", post(handle_graphql))
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock platform failed");
        });

        Self {
            state,
            _handle: handle,
            addr,
        }
    }

    /// Base URL, e.g. "http://127.0.0.1:12345".
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer creation of `sku` with HTTP 400.
    pub async fn reject_sku(&self, sku: &str) {
        self.state.rejected_skus.write().await.insert(sku.to_string());
    }

    /// Make one checkout operation fail.
    pub async fn fail_operation(&self, operation: &str, failure: GraphqlFailure) {
        *self.state.failure.write().await = Some((operation.to_string(), failure));
    }

    /// Number of product create requests received, accepted or not.
    pub fn product_posts(&self) -> usize {
        self.state.product_posts.load(Ordering::SeqCst)
    }

    pub async fn product_skus(&self) -> HashSet<String> {
        self.state.products.read().await.keys().cloned().collect()
    }

    /// The JSON body a stored product was created with.
    pub async fn product_request(&self, sku: &str) -> Option<Value> {
        self.state
            .products
            .read()
            .await
            .get(sku)
            .map(|p| p.request.clone())
    }

    pub async fn graphql_calls(&self) -> Vec<GraphqlCall> {
        self.state.graphql_calls.read().await.clone()
    }

    pub async fn operations(&self) -> Vec<String> {
        self.graphql_calls()
            .await
            .into_iter()
            .map(|c| c.operation)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct TokenRequest {
    username: String,
    password: String,
}

async fn handle_token(Json(req): Json<TokenRequest>) -> (StatusCode, Json<Value>) {
    if req.username == ADMIN_USERNAME && req.password == ADMIN_PASSWORD {
        (StatusCode::OK, Json(json!(ADMIN_TOKEN)))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "The account sign-in was incorrect or your account is disabled temporarily."})),
        )
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", ADMIN_TOKEN);
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "The consumer isn't authorized to access %resources."})),
    )
}

async fn handle_create_product(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    state.product_posts.fetch_add(1, Ordering::SeqCst);

    let product = &body["product"];
    let sku = match product["sku"].as_str() {
        Some(sku) => sku.to_string(),
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": "The \"sku\" value is required."})),
            )
        }
    };

    if state.rejected_skus.read().await.contains(&sku) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": format!("URL key for specified store already exists ({})", sku)})),
        );
    }

    let id = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let record = json!({
        "id": id,
        "sku": sku,
        "name": product["name"],
        "price": product["price"],
        "status": product["status"],
        "type_id": product["type_id"],
    });

    state.products.write().await.insert(
        sku,
        StoredProduct {
            record: record.clone(),
            request: body.clone(),
        },
    );
    (StatusCode::OK, Json(record))
}

async fn handle_get_product(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(sku): Path<String>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    match state.products.read().await.get(&sku) {
        Some(product) => (StatusCode::OK, Json(product.record.clone())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "The product that was requested doesn't exist."})),
        ),
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlBody {
    query: String,
    #[serde(default)]
    variables: Value,
}

fn graphql_errors(message: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({"errors": [{"message": message}], "data": null})),
    )
}

async fn handle_graphql(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<GraphqlBody>,
) -> (StatusCode, Json<Value>) {
    let operation = CHECKOUT_OPERATIONS
        .iter()
        .find(|op| body.query.contains(*op))
        .copied()
        .unwrap_or("unknown");
    let vars = body.variables;

    state.graphql_calls.write().await.push(GraphqlCall {
        operation: operation.to_string(),
        variables: vars.clone(),
        cookie: headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if let Some((failing, failure)) = state.failure.read().await.clone() {
        if failing == operation {
            return match failure {
                GraphqlFailure::Errors => graphql_errors(format!("{} was rejected", operation)),
                GraphqlFailure::Http => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Internal server error"})),
                ),
            };
        }
    }

    let cart_id = match operation {
        "createEmptyCart" | "unknown" => None,
        "setBillingAddressOnCart" => vars["billing"]["cart_id"].as_str(),
        _ => vars["input"]["cart_id"].as_str(),
    };
    if operation != "createEmptyCart" && cart_id != Some(CART_ID) {
        return graphql_errors(format!(
            "Could not find a cart with ID \"{}\"",
            cart_id.unwrap_or_default()
        ));
    }

    let input = &vars["input"];
    let data = match operation {
        "createEmptyCart" => json!({"createEmptyCart": CART_ID}),
        "addBundleProductsToCart" => {
            let item = &input["cart_items"][0]["data"];
            json!({"addBundleProductsToCart": {"cart": {"items": [{
                "id": "1",
                "product": {"name": "Bundle Product 1", "sku": item["sku"]},
                "quantity": item["quantity"],
            }]}}})
        }
        "setBillingAddressOnCart" => {
            let billing = &vars["billing"]["billing_address"]["address"];
            let shipping = &vars["shipping"]["shipping_addresses"][0]["address"];
            json!({
                "setBillingAddressOnCart": {"cart": {"billing_address": {
                    "firstname": billing["firstname"],
                    "lastname": billing["lastname"],
                }}},
                "setShippingAddressesOnCart": {"cart": {"shipping_addresses": [{
                    "firstname": shipping["firstname"],
                    "lastname": shipping["lastname"],
                }]}},
            })
        }
        "setShippingMethodsOnCart" => {
            let method = &input["shipping_methods"][0];
            json!({"setShippingMethodsOnCart": {"cart": {"shipping_addresses": [{
                "selected_shipping_method": {
                    "carrier_code": method["carrier_code"],
                    "method_code": method["method_code"],
                }
            }]}}})
        }
        "setGuestEmailOnCart" => {
            json!({"setGuestEmailOnCart": {"cart": {"email": input["email"]}}})
        }
        "setPaymentMethodOnCart" => json!({"setPaymentMethodOnCart": {"cart": {
            "selected_payment_method": {"code": input["payment_method"]["code"]}
        }}}),
        "placeOrder" => json!({"placeOrder": {"order": {"order_number": ORDER_NUMBER}}}),
        _ => return graphql_errors("Unknown operation".to_string()),
    };

    (StatusCode::OK, Json(json!({"data": data})))
}
