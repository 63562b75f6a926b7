// Gateway module for the backend API - follows the Train Station Pattern
// All external access must go through this gateway
//
// One submodule per resource; each adds its operations to `ApiClient`.

mod auth;
mod client;
mod contracts;
mod properties;
mod response;
mod users;

pub use client::ApiClient;
pub use response::{ApiFailure, ApiResponse, FailureKind};
