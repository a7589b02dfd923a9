use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload for booking an appointment. `hospital` is the id of the hospital
/// document the appointment belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRequest {
    #[serde(rename = "aptDate")]
    pub apt_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub hospital: String,
}

impl From<AppointmentRequest> for Value {
    fn from(request: AppointmentRequest) -> Self {
        serde_json::to_value(request).expect("Failed to serialize appointment payload")
    }
}
