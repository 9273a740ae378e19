use serde::{Deserialize, Serialize};

use super::de_string_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqStatus {
    Active,
    Inactive,
}

impl FaqStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaqStatus::Active => "active",
            FaqStatus::Inactive => "inactive",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            FaqStatus::Active => FaqStatus::Inactive,
            FaqStatus::Inactive => FaqStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(deserialize_with = "de_string_id")]
    pub id: String,
    pub question: String,
    pub answer: String,
    pub status: String,
    #[serde(rename = "type")]
    pub faq_type: String,
}

impl Faq {
    pub fn is_active(&self) -> bool {
        self.status == FaqStatus::Active.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_faq_numeric_id() {
        let faq: Faq = serde_json::from_value(json!({
            "id": 5, "question": "How do refunds work?", "answer": "Within 7 days.",
            "status": "active", "type": "customer"
        }))
        .unwrap();
        assert_eq!(faq.id, "5");
        assert!(faq.is_active());
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(FaqStatus::Active.toggled(), FaqStatus::Inactive);
        assert_eq!(FaqStatus::Inactive.toggled().as_str(), "active");
    }
}
