/// Support/dispute tickets between a customer and a service provider.

use serde::{Deserialize, Serialize};

use super::{de_opt_string_id, de_string_id, de_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(deserialize_with = "de_string_id")]
    pub ticket_id: String,
    #[serde(default, deserialize_with = "de_opt_string_id")]
    pub service_id: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_photo: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub provider_photo: Option<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_message_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl Ticket {
    /// "customer vs provider" headline used in the sidebar.
    pub fn headline(&self) -> String {
        format!(
            "{} vs {}",
            self.customer_name.as_deref().unwrap_or("Unknown"),
            self.provider_name.as_deref().unwrap_or("Unknown")
        )
    }

    /// Participants built from the ticket row itself.
    pub fn participants(&self) -> Participants {
        Participants {
            customer: Participant {
                full_name: self.customer_name.clone(),
                profile_photo: self.customer_photo.clone(),
            },
            provider: Participant {
                full_name: self.provider_name.clone(),
                profile_photo: self.provider_photo.clone(),
            },
        }
    }

    /// Case-insensitive match on either party, the service or the last message.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [
            &self.customer_name,
            &self.provider_name,
            &self.service_name,
            &self.last_message,
        ]
        .iter()
        .any(|field| {
            field
                .as_deref()
                .is_some_and(|value| value.to_lowercase().contains(&query))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Customer,
    Provider,
    Admin,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "de_opt_string_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub message: String,
    #[serde(default = "default_sender_type")]
    pub sender_type: SenderType,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_sender_type() -> SenderType {
    SenderType::Other
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participants {
    #[serde(default)]
    pub customer: Participant,
    #[serde(default)]
    pub provider: Participant,
}

/// Payload of `GET /ticket/:id/show`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketDetail {
    /// Status of the booking the dispute is about.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub participants: Option<Participants>,
}
