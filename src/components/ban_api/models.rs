use serde_json::{Map, Value};
use thiserror::Error;

/// Length of a ban as reported by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanPeriod {
    Known(i64),
    /// The API sent something other than a number
    Unavailable,
}

/// Normalized answer for one ban-status query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanQueryResult {
    pub is_banned: bool,
    pub nickname: String,
    pub period: BanPeriod,
    pub region: String,
}

/// Why a response body could not be turned into a [`BanQueryResult`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// Logical status other than 200
    #[error("API status {}: {message}", status_label(.status))]
    Rejected { status: Option<i64>, message: String },
    #[error("response body is not a JSON object")]
    NotAnObject,
    /// `data` is present but is not an object
    #[error("`data` is not a JSON object")]
    DataNotAnObject,
}

fn status_label(status: &Option<i64>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "missing".to_string(),
    }
}

impl BanQueryResult {
    /// Extract the result from a decoded API body.
    ///
    /// Fields missing from `data` fall back to the API's own defaults.
    pub fn from_payload(body: &Value) -> Result<Self, PayloadError> {
        let object = body.as_object().ok_or(PayloadError::NotAnObject)?;

        let status = object.get("status").and_then(|s| s.as_i64());
        if status != Some(200) {
            let message = object
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            return Err(PayloadError::Rejected { status, message });
        }

        // A missing `data` means defaults; anything but an object is malformed
        let empty = Map::new();
        let data = match object.get("data") {
            None => &empty,
            Some(Value::Object(data)) => data,
            Some(_) => return Err(PayloadError::DataNotAnObject),
        };
        let field = |name: &str| data.get(name);

        let is_banned = match field("is_banned") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !matches!(s.trim(), "" | "0" | "false"),
            _ => false,
        };

        let nickname = match field("nickname") {
            Some(Value::String(s)) => s.clone(),
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        };

        let period = match field("period") {
            None | Some(Value::Null) => BanPeriod::Known(0),
            Some(value) => value
                .as_i64()
                .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
                .map(BanPeriod::Known)
                .unwrap_or(BanPeriod::Unavailable),
        };

        let region = match field("region") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "0".to_string(),
        };

        Ok(Self {
            is_banned,
            nickname,
            period,
            region,
        })
    }
}
