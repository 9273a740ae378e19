/// Vendor storefronts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopType {
    Products,
    Services,
}

impl ShopType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShopType::Products => "products",
            ShopType::Services => "services",
        }
    }

    /// Empty input means "All Types", i.e. no filter.
    pub fn parse_filter(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "products" => Some(ShopType::Products),
            "services" => Some(ShopType::Services),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, rename = "type")]
    pub shop_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub vendor: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Shop {
    /// Vendor display name from whichever shape the nested vendor object has.
    pub fn vendor_name(&self) -> Option<String> {
        let vendor = self.vendor.as_ref()?;
        if let Some(name) = vendor.get("full_name").and_then(Value::as_str) {
            return Some(name.to_string());
        }
        let first = vendor.get("first_name").and_then(Value::as_str).unwrap_or("");
        let last = vendor.get("last_name").and_then(Value::as_str).unwrap_or("");
        let joined = format!("{} {}", first, last).trim().to_string();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}
