use thiserror::Error;

/// Main error type for DOMU
///
/// API operations never return this type: they report failures through
/// [`crate::api::ApiResponse`]. It covers everything around them.
#[derive(Error, Debug)]
pub enum DomuError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ValidationError(String),

    #[error("No hay una sesión activa. Inicie sesión con `domu login`.")]
    NotAuthenticated,

    #[error("Session storage error: {0}")]
    SessionError(String),

    #[error("{0}")]
    ApiError(String),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}
