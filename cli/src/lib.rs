pub mod cli;
pub mod commands;
pub mod context;
pub mod logging;
pub mod repl;

pub use cli::{Cli, Commands, ConfigAction, dispatch};
pub use context::CliContext;
pub use repl::{readline, split_line};
