/// Screen lifecycle and view-state - Gateway
mod scope;
mod view;

pub use scope::ScreenScope;
pub use view::ViewState;
