use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Email of the account the catalog is seeded for when a catalog names no owner.
pub const DEFAULT_OWNER_EMAIL: &str = "tomjerry@gmail.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub owner: OwnerConfig,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerConfig {
    pub email: String,
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            email: DEFAULT_OWNER_EMAIL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    /// Authored order. Kept for readability of catalog files; the persisted
    /// order always comes from the category's position.
    #[serde(default, rename = "order", skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Catalog {
    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
    pub destination: String,
}
