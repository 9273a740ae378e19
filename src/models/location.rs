/// Location hierarchy: a City belongs to a State which belongs to a Country.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub dial_code: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub short_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub country_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub state_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    pub country_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl City {
    /// "City, State, Country" using whichever nested names the server included.
    pub fn display_path(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(state) = &self.state {
            parts.push(state.name.as_str());
        }
        if let Some(country) = &self.country {
            parts.push(country.name.as_str());
        }
        parts.join(", ")
    }
}

/// Row from the combined `/locations` listing. Its shape varies by backend
/// version, so only the id and name are typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
