//! Response Envelope
//!
//! Every JSON body the API returns has the same shape: a machine-readable
//! `code`, a human-readable `message`, and the payload fields merged into the
//! top-level object:
//!
//! ```json
//! {
//!   "code": "success",
//!   "message": "Logged in",
//!   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
//! }
//! ```
//!
//! Clients branch on `code`; `message` is for people.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Machine-readable outcome carried in every response
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseCode {
    Success,
    InvalidInput,
    NotAuthorized,
    NotVerified,
    InvalidToken,
    AlreadyVerified,
    NotFound,
    Conflict,
    ServerError,
}

impl ResponseCode {
    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::InvalidInput => "invalidInput",
            Self::NotAuthorized => "notAuthorized",
            Self::NotVerified => "notVerified",
            Self::InvalidToken => "invalidToken",
            Self::AlreadyVerified => "alreadyVerified",
            Self::NotFound => "notFound",
            Self::Conflict => "conflict",
            Self::ServerError => "serverError",
        }
    }
}

/// JSON response envelope
///
/// Serializes as a single flat object: the payload fields first, then
/// `message`, then `code`. A payload key named `message` or `code` is
/// overwritten by the envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub code: ResponseCode,
    pub message: String,
    pub value: Map<String, Value>,
}

impl ApiResponse {
    /// Create an envelope without payload
    pub fn new(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            value: Map::new(),
        }
    }

    /// Create a `success` envelope
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ResponseCode::Success, message)
    }

    /// Add a payload field
    ///
    /// Values that fail to serialize are stored as `null`.
    pub fn with(mut self, key: impl Into<String>, value: impl serde::Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.value.insert(key.into(), value);
        self
    }
}

impl Serialize for ApiResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = self
            .value
            .keys()
            .filter(|k| k.as_str() != "code" && k.as_str() != "message")
            .count();
        let mut map = serializer.serialize_map(Some(extra + 2))?;
        for (key, value) in &self.value {
            if key == "code" || key == "message" {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry("code", self.code.as_str())?;
        map.end()
    }
}
