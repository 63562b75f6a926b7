/// Session management module - Gateway

mod context;
mod store;

pub use context::{SessionContext, SessionPhase};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
