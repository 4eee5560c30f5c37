// User-facing shell: line input, tokens, stack rendering

pub mod cli;
pub mod format;

pub use cli::{Cli, CliError, EXIT_TOKENS};
pub use format::{format_number, render_stack};
