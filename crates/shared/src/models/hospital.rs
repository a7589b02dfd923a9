use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload for creating a hospital. The store assigns `id` and `createdAt`;
/// appointments are referenced from the appointment side and populated on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalRequest {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postalcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl From<HospitalRequest> for Value {
    fn from(request: HospitalRequest) -> Self {
        serde_json::to_value(request).expect("Failed to serialize hospital payload")
    }
}
