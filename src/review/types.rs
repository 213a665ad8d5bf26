use serde::Deserialize;
use serde_json::Value;

use crate::error::WatchError;

/// One homework entry as the review API returns it. `status` stays a raw
/// string here: unknown values must surface as a formatter error for that
/// record, not as a deserialization failure of the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct Homework {
    pub homework_name: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub homeworks: Vec<Homework>,
    pub current_date: Option<i64>,
}

impl StatusResponse {
    /// Validate the payload shape before committing to typed records.
    /// The API contract is an object with a list under "homeworks"; anything
    /// else aborts the cycle.
    pub fn from_payload(payload: Value) -> Result<Self, WatchError> {
        let Some(obj) = payload.as_object() else {
            return Err(WatchError::BadShape(
                "response is not a JSON object".to_string(),
            ));
        };
        let Some(homeworks) = obj.get("homeworks") else {
            return Err(WatchError::BadShape(
                "no \"homeworks\" key in response".to_string(),
            ));
        };
        if !homeworks.is_array() {
            return Err(WatchError::BadShape(
                "\"homeworks\" is not a list".to_string(),
            ));
        }
        serde_json::from_value(payload).map_err(|e| WatchError::BadShape(e.to_string()))
    }
}
