use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::error::ShellError;
use crate::interpreter::Factory;
use crate::session::Session;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use log::info;
use std::env;
use std::io::Write;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Executes the command against the shell session.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        <T as BuiltinCommand>::execute(*self, stdout, session)
    }
}

/// An early exit from argh: a parse error, or text to print instead of running.
struct InvalidArgs {
    command: &'static str,
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        let output = self.output.trim_end();
        if self.is_error {
            return Err(ShellError::Usage {
                command: self.command,
                message: output.to_string(),
            }
            .into());
        }
        writeln!(stdout, "{output}")?;
        Ok(0)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _session: &Session,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            // Builtin arguments are operands only, so `cd -foo` or `cd help` name directories.
            let operands: Vec<&str> = std::iter::once("--").chain(args.iter().copied()).collect();
            Some(match T::from_args(&[name], &operands) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    command: T::name(),
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Change the working directory of the shell.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        let target = match self.target {
            Some(t) if !t.is_empty() => PathBuf::from(t),
            _ => {
                return Err(ShellError::MissingArgument {
                    command: "cd",
                    argument: "directory",
                }
                .into());
            }
        };

        let new_dir = if target.is_absolute() {
            target
        } else {
            session.current_dir().join(target)
        };

        env::set_current_dir(&new_dir).map_err(|source| ShellError::ChangeDirectory {
            target: new_dir.clone(),
            source,
        })?;
        // The chdir succeeded, so the kernel's view of the directory is the one to show.
        let current = env::current_dir().unwrap_or(new_dir);
        info!("changed directory to {}", current.display());
        session.set_current_dir(current);
        Ok(0)
    }
}
