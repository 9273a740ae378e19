/// Product, service and delivery categories, optionally nested under a parent.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{de_opt_amount, de_opt_count};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Products,
    Services,
    Deliveries,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Products => "products",
            CategoryType::Services => "services",
            CategoryType::Deliveries => "deliveries",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "products" | "product" => Some(CategoryType::Products),
            "services" | "service" => Some(CategoryType::Services),
            "deliveries" | "delivery" => Some(CategoryType::Deliveries),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub category_type: Option<String>,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Category {
    pub fn is_subcategory(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalytics {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub category_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub total_sales_count: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub total_sales_amount: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub total_orders: Option<u64>,
}

/// Parent choices for a category form: same type only, never the category itself.
pub fn parent_options(candidates: &[Category], editing_id: Option<u64>) -> Vec<(u64, String)> {
    candidates
        .iter()
        .filter(|cat| Some(cat.id) != editing_id)
        .map(|cat| (cat.id, cat.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_accepts_singular_labels() {
        assert_eq!(CategoryType::parse("Product"), Some(CategoryType::Products));
        assert_eq!(CategoryType::parse("services"), Some(CategoryType::Services));
        assert_eq!(CategoryType::parse("delivery"), Some(CategoryType::Deliveries));
        assert_eq!(CategoryType::parse("other"), None);
    }

    #[test]
    fn test_category_type_field_renamed() {
        let cat: Category = serde_json::from_value(json!({
            "id": 3, "name": "Spices", "type": "products", "parent_id": 1, "parent_name": "Food"
        }))
        .unwrap();
        assert_eq!(cat.category_type.as_deref(), Some("products"));
        assert!(cat.is_subcategory());
    }

    #[test]
    fn test_parent_options_exclude_self() {
        let cats = vec![
            Category {
                id: 1,
                name: "Food".to_string(),
                description: None,
                category_type: None,
                parent_id: None,
                parent_name: None,
                image: None,
            },
            Category {
                id: 2,
                name: "Fashion".to_string(),
                description: None,
                category_type: None,
                parent_id: None,
                parent_name: None,
                image: None,
            },
        ];

        let options = parent_options(&cats, Some(2));
        assert_eq!(options, vec![(1, "Food".to_string())]);
        assert_eq!(parent_options(&cats, None).len(), 2);
    }

    #[test]
    fn test_analytics_sales_columns() {
        let row: CategoryAnalytics = serde_json::from_value(json!({
            "id": 4,
            "name": "Food",
            "type": "products",
            "total_sales_count": 12,
            "total_sales_amount": "300.50",
            "total_orders": "7"
        }))
        .unwrap();
        assert_eq!(row.category_type.as_deref(), Some("products"));
        assert_eq!(row.total_sales_count, Some(12));
        assert_eq!(row.total_sales_amount, Some(300.5));
        assert_eq!(row.total_orders, Some(7));
    }
}
