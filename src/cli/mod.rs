/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;
mod render;

pub use args::{
    Cli, Commands, ContractCommand, CreatePropertyArgs, OutputFormat, PropertyCommand,
    RegisterArgs, UpdatePropertyArgs, UserCommand,
};
pub use commands::handle_command;
pub use render::{show, show_list, show_pending, Render};
