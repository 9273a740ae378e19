/// Paid plans vendors subscribe to, and the vendors currently subscribed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de_opt_amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(deserialize_with = "de_monthly_price")]
    pub monthly_price: f64,
    /// HTML feature list as edited in the console.
    #[serde(default)]
    pub features: String,
    #[serde(default)]
    pub payment_link_url: String,
}

fn de_monthly_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(de_opt_amount(deserializer)?.unwrap_or(0.0))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub shop: Option<Value>,
    #[serde(default)]
    pub subscription: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

impl Subscriber {
    pub fn shop_name(&self) -> &str {
        self.shop
            .as_ref()
            .and_then(|s| s.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("-")
    }

    pub fn plan_name(&self) -> &str {
        self.subscription
            .as_ref()
            .and_then(|s| s.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("-")
    }

    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subscription_price_as_string() {
        let plan: Subscription = serde_json::from_value(json!({
            "id": 1, "name": "Gold", "monthly_price": "29.99",
            "features": "<ul><li>Priority listing</li></ul>",
            "payment_link_url": "https://pay.example/gold"
        }))
        .unwrap();
        assert_eq!(plan.monthly_price, 29.99);
    }

    #[test]
    fn test_subscriber_fallbacks() {
        let sub: Subscriber = serde_json::from_value(json!({"status": "expired"})).unwrap();
        assert_eq!(sub.shop_name(), "-");
        assert_eq!(sub.plan_name(), "-");
        assert!(!sub.is_active());
    }
}
