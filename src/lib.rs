//! `mish`, a minimal interactive shell.
//!
//! The shell reads a line, splits it on spaces and either changes its own working
//! directory (`cd`) or runs the line as a program in a child process, waiting for
//! it before prompting again. There is no quoting, no pipelines and no
//! redirection.
//!
//! The main entry point is [`Interpreter`]. It holds a [`Session`] with the state
//! shown in the prompt and a list of [`command::CommandFactory`] objects that
//! decide how a command name is executed.

mod builtin;
pub mod command;
pub mod error;
mod external;
mod interpreter;
mod lexer;
pub mod prompt;
mod session;
pub mod startup;

pub use error::ShellError;
pub use interpreter::{Interpreter, LoopControl, read_line};
pub use lexer::tokenize;
pub use prompt::{Identity, Prompt};
pub use session::Session;

/// Name used as the prefix of every diagnostic.
pub const PROGRAM_NAME: &str = "mish";

/// Text printed by `--version`.
pub fn version_banner() -> String {
    format!(
        "{PROGRAM_NAME} {}\nLicense: {}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_LICENSE")
    )
}
