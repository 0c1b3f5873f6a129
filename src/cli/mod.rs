pub mod commands;
pub mod context;
pub mod output;
mod shell;

pub use context::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
