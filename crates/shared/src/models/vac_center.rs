use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacCenterRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
}

impl From<VacCenterRequest> for Value {
    fn from(request: VacCenterRequest) -> Self {
        serde_json::to_value(request).expect("Failed to serialize vaccine center payload")
    }
}
