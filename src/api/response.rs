use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{
    CANCELLED_MESSAGE, MALFORMED_RESPONSE_MESSAGE, NETWORK_ERROR_MESSAGE,
};
use crate::models::{Session, User};
use crate::utils::DomuError;

/// Why a request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "status", rename_all = "snake_case")]
pub enum FailureKind {
    /// The server answered with a non-2xx status or `success: false`
    Status(u16),
    /// The request never got a complete response
    Transport,
    /// 2xx, but the body was not the expected shape
    Malformed,
    /// The owning scope was closed before the response arrived
    Cancelled,
    /// No session to authorize a protected endpoint; nothing was sent
    Unauthenticated,
}

/// A failed API call, carrying a message fit to show the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiFailure {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Status(status),
            message: message.into(),
        }
    }

    pub fn transport() -> Self {
        Self {
            kind: FailureKind::Transport,
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Malformed,
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            kind: FailureKind::Cancelled,
            message: CANCELLED_MESSAGE.to_string(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            kind: FailureKind::Unauthenticated,
            message: DomuError::NotAuthenticated.to_string(),
        }
    }
}

impl From<ApiFailure> for DomuError {
    fn from(failure: ApiFailure) -> Self {
        DomuError::ApiError(failure.message)
    }
}

/// The normalized result every API operation returns
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success {
        data: Option<T>,
        message: Option<String>,
    },
    Failure(ApiFailure),
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse::Success {
            data: Some(data),
            message: None,
        }
    }

    /// A success that carries only a message
    pub fn acknowledged(message: impl Into<String>) -> Self {
        ApiResponse::Success {
            data: None,
            message: Some(message.into()),
        }
    }

    /// Attach a message to a success; failures keep their own
    pub fn with_message(self, text: impl Into<String>) -> Self {
        match self {
            ApiResponse::Success { data, .. } => ApiResponse::Success {
                data,
                message: Some(text.into()),
            },
            failure => failure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiResponse::Success { message, .. } => message.as_deref(),
            ApiResponse::Failure(failure) => Some(&failure.message),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success { data, .. } => data.as_ref(),
            ApiResponse::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            ApiResponse::Success { .. } => None,
            ApiResponse::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<Option<T>, ApiFailure> {
        match self {
            ApiResponse::Success { data, .. } => Ok(data),
            ApiResponse::Failure(failure) => Err(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            ApiResponse::Success { data, message } => ApiResponse::Success {
                data: data.map(f),
                message,
            },
            ApiResponse::Failure(failure) => ApiResponse::Failure(failure),
        }
    }
}

impl<T> From<ApiFailure> for ApiResponse<T> {
    fn from(failure: ApiFailure) -> Self {
        ApiResponse::Failure(failure)
    }
}

impl<T> From<Result<T, ApiFailure>> for ApiResponse<T> {
    fn from(result: Result<T, ApiFailure>) -> Self {
        match result {
            Ok(data) => ApiResponse::success(data),
            Err(failure) => ApiResponse::Failure(failure),
        }
    }
}

/// `{success: true, data?, message?}` or `{success: false, message, error}`
impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a, D> {
            success: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            message: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            data: Option<&'a D>,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<&'a FailureKind>,
        }

        let wire = match self {
            ApiResponse::Success { data, message } => Wire {
                success: true,
                message: message.as_deref(),
                data: data.as_ref(),
                error: None,
            },
            ApiResponse::Failure(failure) => Wire {
                success: false,
                message: Some(&failure.message),
                data: None,
                error: Some(&failure.kind),
            },
        };
        wire.serialize(serializer)
    }
}

/// Message used when a rejected response carries no usable `message`
#[derive(Debug, Clone, Copy)]
pub(crate) enum StatusFallback {
    /// `Error <status>`
    Short,
    /// `Error del servidor: <status>`
    Server,
    Fixed(&'static str),
}

impl StatusFallback {
    pub(crate) fn message(&self, status: StatusCode) -> String {
        match self {
            StatusFallback::Short => format!("Error {}", status.as_u16()),
            StatusFallback::Server => format!("Error del servidor: {}", status.as_u16()),
            StatusFallback::Fixed(text) => text.to_string(),
        }
    }
}

/// Non-empty `message` string of a response body
pub(crate) fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// A 2xx JSON body, before its payload field is pulled out
#[derive(Debug)]
pub(crate) struct Envelope {
    body: Value,
}

impl Envelope {
    pub(crate) fn new(body: Value) -> Self {
        Self { body }
    }

    /// Required payload field
    pub(crate) fn extract<T: DeserializeOwned>(&self, field: &str) -> Result<T, ApiFailure> {
        self.extract_optional(field)?.ok_or_else(|| {
            tracing::warn!(field, "response is missing its payload field");
            ApiFailure::malformed(MALFORMED_RESPONSE_MESSAGE)
        })
    }

    /// Payload field that may be absent or null; present but ill-typed is still an error
    pub(crate) fn extract_optional<T: DeserializeOwned>(
        &self,
        field: &str,
    ) -> Result<Option<T>, ApiFailure> {
        match self.body.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value).map(Some).map_err(|e| {
                tracing::warn!(field, error = %e, "response payload has an unexpected shape");
                ApiFailure::malformed(MALFORMED_RESPONSE_MESSAGE)
            }),
        }
    }

    pub(crate) fn extract_or_default<T: DeserializeOwned + Default>(
        &self,
        field: &str,
    ) -> Result<T, ApiFailure> {
        Ok(self.extract_optional(field)?.unwrap_or_default())
    }

    pub(crate) fn message(&self) -> Option<String> {
        server_message(&self.body)
    }

    /// Token and user of an auth response, when both are present and valid
    pub(crate) fn session(&self) -> Option<Session> {
        let token = self
            .body
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())?;
        let user: User = self.extract_optional("user").ok().flatten()?;
        Some(Session::new(token, user))
    }
}
