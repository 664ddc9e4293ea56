pub mod args;
pub mod commands;

pub use args::CliArgs;
pub use commands::{confirm_modification, handle_commands, validate_config};
