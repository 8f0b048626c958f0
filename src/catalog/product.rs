//! REST product descriptors.
//!
//! Request and response shapes for `POST /rest/V1/products`. Constructors
//! carry the fixture defaults: enabled, visible in catalog and search,
//! default attribute set, 100 units in stock.

use serde::{Deserialize, Serialize};

/// SKU of the simple product every generated bundle links to.
pub const SHARED_SIMPLE_SKU: &str = "simple-product-1";
/// Name of the shared simple product.
pub const SHARED_SIMPLE_NAME: &str = "Simple Product 1";
/// Price of the shared simple product.
pub const SHARED_SIMPLE_PRICE: f64 = 10.0;

/// Default attribute set id.
pub const DEFAULT_ATTRIBUTE_SET_ID: u32 = 4;
/// Visibility code for "Catalog, Search".
pub const VISIBILITY_CATALOG_SEARCH: u8 = 4;
/// Main website id.
pub const DEFAULT_WEBSITE_ID: u32 = 1;
/// Stock quantity given to every generated product.
pub const DEFAULT_STOCK_QTY: f64 = 100.0;

/// Product type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Simple,
    Bundle,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Simple => "simple",
            ProductType::Bundle => "bundle",
        }
    }
}

/// Product status, sent as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ProductStatus {
    Disabled,
    Enabled,
}

impl From<ProductStatus> for u8 {
    fn from(status: ProductStatus) -> Self {
        match status {
            ProductStatus::Disabled => 0,
            ProductStatus::Enabled => 1,
        }
    }
}

impl TryFrom<u8> for ProductStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 | 2 => Ok(ProductStatus::Disabled),
            1 => Ok(ProductStatus::Enabled),
            other => Err(format!("unknown product status code {}", other)),
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Disabled => write!(f, "disabled"),
            ProductStatus::Enabled => write!(f, "enabled"),
        }
    }
}

/// Stock settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub qty: f64,
    pub is_in_stock: bool,
}

impl Default for StockItem {
    fn default() -> Self {
        Self {
            qty: DEFAULT_STOCK_QTY,
            is_in_stock: true,
        }
    }
}

/// A linked product inside a bundle option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLink {
    pub sku: String,
    pub option_id: u32,
    pub qty: f64,
    pub position: u32,
    pub is_default: bool,
    pub price: f64,
    pub price_type: u8,
    pub can_change_quantity: u8,
}

/// One selectable option of a bundle product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleOption {
    pub option_id: u32,
    pub position: u32,
    pub sku: String,
    pub title: String,
    #[serde(rename = "type")]
    pub input_type: String,
    pub required: bool,
    pub product_links: Vec<ProductLink>,
}

impl BundleOption {
    /// A required drop-down whose only selection is `linked_sku`, qty 1, no
    /// extra charge.
    pub fn single_select(linked_sku: &str) -> Self {
        Self {
            option_id: 0,
            position: 1,
            sku: linked_sku.to_string(),
            title: "Option 1".to_string(),
            input_type: "select".to_string(),
            required: true,
            product_links: vec![ProductLink {
                sku: linked_sku.to_string(),
                option_id: 1,
                qty: 1.0,
                position: 1,
                is_default: false,
                price: 0.0,
                price_type: 0,
                can_change_quantity: 0,
            }],
        }
    }
}

/// `extension_attributes` block of a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_item: Option<StockItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_ids: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_product_options: Option<Vec<BundleOption>>,
}

/// Custom attribute code/value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomAttribute {
    pub attribute_code: String,
    pub value: serde_json::Value,
}

/// Product descriptor as accepted by the REST API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub status: ProductStatus,
    pub type_id: ProductType,
    pub visibility: u8,
    pub attribute_set_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub extension_attributes: ExtensionAttributes,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<CustomAttribute>,
}

/// Body of a product-creation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRequest {
    pub product: Product,
    #[serde(rename = "saveOptions", skip_serializing_if = "Option::is_none")]
    pub save_options: Option<bool>,
}

impl ProductRequest {
    /// Enabled simple product, weight 1.0, 100 in stock.
    pub fn simple(sku: &str, name: &str, price: f64) -> Self {
        Self {
            product: Product {
                sku: sku.to_string(),
                name: name.to_string(),
                price,
                status: ProductStatus::Enabled,
                type_id: ProductType::Simple,
                visibility: VISIBILITY_CATALOG_SEARCH,
                attribute_set_id: DEFAULT_ATTRIBUTE_SET_ID,
                weight: Some(1.0),
                extension_attributes: ExtensionAttributes {
                    stock_item: Some(StockItem::default()),
                    ..ExtensionAttributes::default()
                },
                custom_attributes: Vec::new(),
            },
            save_options: None,
        }
    }

    /// Bundle product with one required select option linking `linked_sku`.
    pub fn bundle(
        sku: &str,
        name: &str,
        price: f64,
        status: ProductStatus,
        linked_sku: &str,
    ) -> Self {
        Self {
            product: Product {
                sku: sku.to_string(),
                name: name.to_string(),
                price,
                status,
                type_id: ProductType::Bundle,
                visibility: VISIBILITY_CATALOG_SEARCH,
                attribute_set_id: DEFAULT_ATTRIBUTE_SET_ID,
                weight: None,
                extension_attributes: ExtensionAttributes {
                    stock_item: Some(StockItem::default()),
                    website_ids: Some(vec![DEFAULT_WEBSITE_ID]),
                    bundle_product_options: Some(vec![BundleOption::single_select(linked_sku)]),
                },
                custom_attributes: vec![CustomAttribute {
                    attribute_code: "price_view".to_string(),
                    value: serde_json::Value::String("0".to_string()),
                }],
            },
            save_options: Some(true),
        }
    }

    pub fn sku(&self) -> &str {
        &self.product.sku
    }

    /// SKUs referenced by the bundle options' product links.
    pub fn linked_skus(&self) -> Vec<&str> {
        self.product
            .extension_attributes
            .bundle_product_options
            .iter()
            .flatten()
            .flat_map(|option| option.product_links.iter())
            .map(|link| link.sku.as_str())
            .collect()
    }
}

/// Product as returned by the REST API.
///
/// Only the fields the fixtures check are decoded; everything else is
/// ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub sku: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<u8>,
    #[serde(default)]
    pub type_id: Option<String>,
}
