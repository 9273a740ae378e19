/// Domain records mirrored from the admin API.
/// Records are kept as the server sends them; the console only displays nested objects.

pub mod booking;
pub mod category;
pub mod faq;
pub mod location;
pub mod order;
pub mod shop;
pub mod subscription;
pub mod ticket;
pub mod tutorial;

pub use booking::{Booking, BookingDetail, BookingService, Customer};
pub use category::{Category, CategoryAnalytics, CategoryType};
pub use faq::{Faq, FaqStatus};
pub use location::{City, Country, Location, State};
pub use order::{
    Order, OrderDetail, OrderItem, OrderStats, PaymentStatus, Product, ShippingStatus,
    TimelineStep,
};
pub use shop::{Shop, ShopType};
pub use subscription::{Subscriber, Subscription};
pub use ticket::{Message, Participant, Participants, SenderType, Ticket, TicketDetail};
pub use tutorial::Tutorial;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Optional `{ status, message, data }` wrapper some endpoints put around their payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    /// Either `success: true`, `status: "success"` or `status: true` marks success.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(false)
            || matches!(&self.status, Some(Value::String(s)) if s == "success")
            || matches!(&self.status, Some(Value::Bool(true)))
    }
}

/// Accept a number, a numeric string or null for money-like fields.
pub(crate) fn de_opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {}", s))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid amount: {}",
            other
        ))),
    }
}

/// Accept a count sent as a number or a numeric string.
pub(crate) fn de_opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_u64().or_else(|| n.as_f64().map(|f| f as u64))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid count: {}", s))),
        Some(other) => Err(serde::de::Error::custom(format!("invalid count: {}", other))),
    }
}

/// Text that may arrive as null, e.g. an attachment-only chat message.
pub(crate) fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Image lists come back either as one URL or as an array of URLs.
pub(crate) fn de_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s]),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(serde::de::Error::custom(format!("invalid image: {}", other))),
            })
            .collect(),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid image list: {}",
            other
        ))),
    }
}

/// Accept a string or an integer id, normalising to a string.
pub(crate) fn de_string_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

pub(crate) fn de_opt_string_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

/// Render an optional amount with two decimals, as the order screens did.
pub fn format_amount(amount: Option<f64>) -> String {
    format!("{:.2}", amount.unwrap_or(0.0))
}
