use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Discriminant of [`Error`], for callers that switch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller must re-authenticate (401/403).
    Auth,
    /// The request was rejected with field-level detail (422).
    Validation,
    /// Any other non-success HTTP status.
    Api,
    /// The request never produced an HTTP response.
    Transport,
    /// The failure happened on this side of the wire before or after the call.
    Client,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
        data: Option<Value>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        data: Option<Value>,
    },

    #[error("{message}")]
    Auth {
        message: String,
        status: u16,
        data: Option<Value>,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Failed to serialize request payload: {0}")]
    Serialization(serde_json::Error),

    #[error("Failed to deserialize response payload: {0}")]
    Deserialization(serde_json::Error),

    #[error("{0} is not available on this gateway")]
    Unsupported(&'static str),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

pub(crate) const VALIDATION_STATUS: u16 = 422;
pub(crate) const DEFAULT_AUTH_STATUS: u16 = 401;

impl Error {
    pub fn api(message: impl Into<String>, status: Option<u16>, data: Option<Value>) -> Self {
        Error::Api {
            message: message.into(),
            status,
            data,
        }
    }

    pub fn validation(message: impl Into<String>, data: Option<Value>) -> Self {
        Error::Validation {
            message: message.into(),
            data,
        }
    }

    /// Builds an authentication error. Without an explicit status the error reports 401.
    pub fn auth(message: impl Into<String>, status: Option<u16>, data: Option<Value>) -> Self {
        Error::Auth {
            message: message.into(),
            status: status.unwrap_or(DEFAULT_AUTH_STATUS),
            data,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Auth { .. } => ErrorKind::Auth,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Api { .. } => ErrorKind::Api,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Serialization(_)
            | Error::Deserialization(_)
            | Error::Unsupported(_)
            | Error::MissingParameter(_) => ErrorKind::Client,
        }
    }

    /// HTTP status the error was classified from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => *status,
            Error::Validation { .. } => Some(VALIDATION_STATUS),
            Error::Auth { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Parsed response body carried by HTTP-derived errors, untouched.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Error::Api { data, .. } | Error::Validation { data, .. } | Error::Auth { data, .. } => {
                data.as_ref()
            }
            _ => None,
        }
    }

    /// Field-level messages of a validation error.
    ///
    /// The payload is searched under `errors` first and `fieldErrors` second; the first
    /// key holding an object wins. Any other error kind yields an empty map.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let Error::Validation { data: Some(data), .. } = self else {
            return BTreeMap::new();
        };

        ["errors", "fieldErrors"]
            .iter()
            .find_map(|key| data.get(*key).and_then(Value::as_object))
            .map(|fields| {
                fields
                    .iter()
                    .map(|(field, message)| {
                        let message = match message {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        (field.clone(), message)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Auth and validation failures need user action, so only generic API and transport
    /// failures are worth repeating.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Api | ErrorKind::Transport)
    }
}
