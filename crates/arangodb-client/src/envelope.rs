//! Server response envelope
//!
//! Every ArangoDB response is a JSON object carrying status metadata
//! (`error`, `errorNum`, `code`, `errorMessage`) next to the payload, which
//! is either nested under `result` or spread over the top level.

use crate::{
    error::{Error, Result},
    http::Response,
};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A parsed response envelope that has not been checked for errors yet.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    status: StatusCode,
    body: Map<String, Value>,
}

impl ResponseEnvelope {
    /// Parse the body of a raw response.
    ///
    /// An empty body parses as an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialization`] if the body is not a JSON object.
    pub fn parse(response: &Response) -> Result<Self> {
        let body = if response.body().iter().all(u8::is_ascii_whitespace) {
            Map::new()
        } else {
            match serde_json::from_slice::<Value>(response.body()) {
                Ok(Value::Object(map)) => map,
                Ok(other) => {
                    return Err(Error::Deserialization(format!(
                        "expected a JSON object from the server (HTTP {}), got {}",
                        response.status().as_u16(),
                        json_kind(&other)
                    )));
                }
                Err(e) => {
                    return Err(Error::Deserialization(format!(
                        "invalid JSON from the server (HTTP {}): {}",
                        response.status().as_u16(),
                        e
                    )));
                }
            }
        };

        Ok(Self {
            status: response.status(),
            body,
        })
    }

    /// Whether the server set `"error": true`.
    pub fn is_error(&self) -> bool {
        self.body.get("error").and_then(Value::as_bool) == Some(true)
    }

    /// The `errorNum` field, if present.
    pub fn error_num(&self) -> Option<i64> {
        self.body.get("errorNum").and_then(Value::as_i64)
    }

    /// The `code` field, falling back to the HTTP status.
    pub fn code(&self) -> u16 {
        self.body
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or_else(|| self.status.as_u16())
    }

    /// The `errorMessage` field, falling back to the HTTP reason phrase.
    pub fn error_message(&self) -> String {
        self.body
            .get("errorMessage")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| self.status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", self.status.as_u16()))
    }

    /// Fail with [`Error::Server`] if the envelope or the HTTP status signals an error.
    ///
    /// The `error` flag wins regardless of HTTP status; a non-2xx status
    /// without the flag is still treated as a server error.
    pub fn check(self) -> Result<Self> {
        if self.is_error() || !self.status.is_success() {
            return Err(self.server_error());
        }
        Ok(self)
    }

    /// Fail with [`Error::Server`] only if the HTTP status is not 2xx.
    ///
    /// For bodies that carry user data instead of an envelope, where
    /// `error` and `result` may be ordinary fields.
    pub fn check_status(self) -> Result<Self> {
        if !self.status.is_success() {
            return Err(self.server_error());
        }
        Ok(self)
    }

    fn server_error(&self) -> Error {
        let error_num = self.error_num().unwrap_or(0);
        tracing::warn!(
            code = self.code(),
            error_num,
            "Server reported an error"
        );
        Error::Server {
            code: self.code(),
            error_num,
            message: self.error_message(),
        }
    }

    /// Deserialize the payload into `T`.
    ///
    /// Uses the `result` field when present, otherwise the whole object.
    pub fn into_merged<T: DeserializeOwned>(mut self) -> Result<T> {
        let payload = match self.body.remove("result") {
            Some(result) => result,
            None => Value::Object(self.body),
        };
        serde_json::from_value(payload).map_err(|e| Error::Deserialization(e.to_string()))
    }

    /// Deserialize the whole body as `T`, ignoring envelope fields.
    pub fn into_document<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(Value::Object(self.body))
            .map_err(|e| Error::Deserialization(e.to_string()))
    }

    /// Deserialize only the `result` field, discarding everything else.
    ///
    /// A missing or `null` result yields `None`.
    pub fn into_single<T: DeserializeOwned>(mut self) -> Result<Option<T>> {
        match self.body.remove("result") {
            None | Some(Value::Null) => Ok(None),
            Some(result) => serde_json::from_value(result)
                .map(Some)
                .map_err(|e| Error::Deserialization(e.to_string())),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
