// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod contract;
mod property;
mod reference;
mod session;
mod user;

// Public re-exports - the ONLY way to access model functionality
pub use contract::{Contract, CreateContractData};
pub use property::{CreatePropertyData, Property, PropertyKind, PropertyStatus, UpdatePropertyData};
pub use reference::{Identified, Ref};
pub use session::Session;
pub use user::{LoginData, RegisterData, Role, UpdateUserData, User};
