/// Physical-goods orders and the status vocabularies shared with bookings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::{de_opt_amount, de_string_list};

/// Shipping (orders) or delivery (bookings) progress. Unknown values read as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum ShippingStatus {
    #[default]
    Pending,
    Processing,
    Ongoing,
    Returned,
    Delivered,
    Cancelled,
}

impl ShippingStatus {
    pub const ALL: [ShippingStatus; 6] = [
        ShippingStatus::Pending,
        ShippingStatus::Processing,
        ShippingStatus::Ongoing,
        ShippingStatus::Returned,
        ShippingStatus::Delivered,
        ShippingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingStatus::Pending => "pending",
            ShippingStatus::Processing => "processing",
            ShippingStatus::Ongoing => "ongoing",
            ShippingStatus::Returned => "returned",
            ShippingStatus::Delivered => "delivered",
            ShippingStatus::Cancelled => "cancelled",
        }
    }

    /// Strict parse for user input.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl From<Option<String>> for ShippingStatus {
    fn from(value: Option<String>) -> Self {
        value
            .as_deref()
            .and_then(ShippingStatus::parse)
            .unwrap_or_default()
    }
}

impl fmt::Display for ShippingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment progress. Unknown values read as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Cancelled,
    Completed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Cancelled,
        PaymentStatus::Completed,
        PaymentStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl From<Option<String>> for PaymentStatus {
    fn from(value: Option<String>) -> Self {
        value
            .as_deref()
            .and_then(PaymentStatus::parse)
            .unwrap_or_default()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub shipping_status: ShippingStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub vendor_payment_settlement_status: Option<String>,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub shipping_date: Option<String>,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_string_list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub price: Option<f64>,
}

impl Product {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("N/A")
    }
}

/// One line of an order: a product bought from one shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: u64,
    pub order: Order,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub shop: Option<Value>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub subtotal: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderStats {
    #[serde(default)]
    pub total_orders: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub total_spent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order_item: OrderItem,
    #[serde(default)]
    pub stats: Option<OrderStats>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineStep {
    pub label: &'static str,
    pub timestamp: Option<String>,
    pub done: bool,
}

impl Order {
    /// Created → Payment → Shipped → Delivered progress for the detail view.
    pub fn timeline(&self) -> Vec<TimelineStep> {
        vec![
            TimelineStep {
                label: "Order created",
                timestamp: self.created_at.clone(),
                done: true,
            },
            TimelineStep {
                label: "Payment",
                timestamp: self.payment_date.clone(),
                done: self.payment_date.is_some(),
            },
            TimelineStep {
                label: "Shipped",
                timestamp: self.shipping_date.clone(),
                done: self.shipping_status != ShippingStatus::Pending
                    && self.shipping_date.is_some(),
            },
            TimelineStep {
                label: "Delivered",
                timestamp: self.delivery_date.clone(),
                done: self.shipping_status == ShippingStatus::Delivered
                    || self.delivery_date.is_some(),
            },
        ]
    }

    /// Only untouched orders can be cancelled from the console.
    pub fn is_cancellable(&self) -> bool {
        self.shipping_status == ShippingStatus::Pending
            && self.payment_status == PaymentStatus::Pending
    }
}
