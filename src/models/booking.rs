/// Bookings: scheduled-service orders placed with service shops.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{de_opt_amount, de_string_list, PaymentStatus, ShippingStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

impl Customer {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Unknown customer")
    }
}

/// The booked service. Older rows carry `name` instead of `title`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingService {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "de_string_list")]
    pub images: Vec<String>,
}

impl BookingService {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("N/A")
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: u64,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub shop: Option<Value>,
    #[serde(default)]
    pub service: Option<BookingService>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub total: Option<f64>,
    #[serde(default)]
    pub delivery_status: ShippingStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Booking {
    /// Charged amount; `total` is the older name for it.
    pub fn amount(&self) -> Option<f64> {
        self.amount.or(self.total)
    }

    pub fn shop_name(&self) -> Option<&str> {
        self.shop.as_ref()?.get("name")?.as_str()
    }
}

/// Detail screen payload; the server may wrap the booking under `booking`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookingDetail {
    Wrapped { booking: Booking },
    Bare(Booking),
}

impl BookingDetail {
    pub fn into_booking(self) -> Booking {
        match self {
            BookingDetail::Wrapped { booking } => booking,
            BookingDetail::Bare(booking) => booking,
        }
    }
}
