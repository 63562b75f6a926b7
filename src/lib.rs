pub mod api;
pub mod app;
pub mod cli;
pub mod constants;
pub mod forms;
pub mod models;
pub mod runtime;
pub mod session;
pub mod utils;

pub use api::{ApiClient, ApiFailure, ApiResponse, FailureKind};
pub use app::{load_config, AppState, Config};
pub use runtime::{ScreenScope, ViewState};
pub use session::{SessionContext, SessionPhase};
pub use utils::DomuError;
