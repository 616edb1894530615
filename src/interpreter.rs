use crate::command::{CommandFactory, ExitCode};
use crate::error::ShellError;
use crate::lexer;
use crate::session::Session;
use crate::PROGRAM_NAME;
use anyhow::Context;
use log::{debug, info};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};

/// The line that ends the shell. Matched exactly, before tokenizing.
const EXIT_COMMAND: &str = "exit";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only support commands defined in this crate — BuiltinCommand and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// What the loop does after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// The interactive shell: reads lines, runs `cd` in-process and everything
/// else as a child process, one at a time.
///
/// The interpreter owns a [`Session`] and a list of [`CommandFactory`] objects
/// that are queried in order to create commands by name.
///
/// Example
/// ```no_run
/// use mish::{Identity, Interpreter, Session};
/// let session = Session::new(Identity::resolve().unwrap());
/// let mut sh = Interpreter::with_default_commands(session);
/// let code = sh.run("true", &[]).unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Interpreter {
    session: Session,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(session: Session, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { session, commands }
    }

    /// Create an interpreter with the default set of commands:
    /// - built-in: `cd`
    /// - external command launcher
    pub fn with_default_commands(session: Session) -> Self {
        use crate::builtin::Cd;
        use crate::external::ExternalCommand;
        Self::new(
            session,
            vec![
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<ExternalCommand>::default()),
            ],
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Returns the command's exit code or an error if the command cannot be created
    /// or fails to execute.
    pub fn run(&mut self, name: &str, args: &[&str]) -> anyhow::Result<ExitCode> {
        self.run_with_output(name, args, &mut io::stdout())
    }

    fn run_with_output(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.session, name, args) {
                return cmd.execute(stdout, &mut self.session);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// Handle one input line.
    ///
    /// Errors are written to `stderr` and never end the loop; only the exact
    /// line `exit` does.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> LoopControl {
        if line == EXIT_COMMAND {
            return LoopControl::Exit;
        }

        let tokens = lexer::tokenize(line);
        debug!("tokens = {:?}", tokens);
        let Some((name, args)) = tokens.split_first() else {
            return LoopControl::Continue;
        };

        let status = match self.run_with_output(name, args, stdout) {
            Ok(code) => code,
            Err(err) => {
                // Nowhere left to report a failing stderr.
                let _ = writeln!(stderr, "{PROGRAM_NAME}: {err:#}");
                failure_status(&err)
            }
        };
        debug!("{name} exited with {status}");
        self.session.set_last_status(status);
        LoopControl::Continue
    }

    /// Read-eval loop over the controlling terminal.
    ///
    /// Returns once `exit` is entered or input ends.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new().context("cannot initialise line editor")?;
        let mut stdout = io::stdout();
        let mut stderr = io::stderr();

        while let Some(line) = read_line(&mut rl, self.session.prompt())? {
            if !line.trim().is_empty() {
                rl.add_history_entry(line.as_str())?;
            }
            if self.execute_line(&line, &mut stdout, &mut stderr) == LoopControl::Exit {
                return Ok(());
            }
        }
        info!("end of input");
        Ok(())
    }
}

/// Status recorded for a line whose command could not be run at all.
fn failure_status(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ShellError>() {
        Some(ShellError::Spawn { source, .. }) if source.kind() == io::ErrorKind::NotFound => 127,
        Some(ShellError::Spawn { .. }) => 126,
        _ => 1,
    }
}

/// Show `prompt` and wait for a line.
///
/// `None` means the input has ended.
pub fn read_line(rl: &mut DefaultEditor, prompt: &str) -> rustyline::Result<Option<String>> {
    line_or_end(rl.readline(prompt))
}

fn line_or_end(read: rustyline::Result<String>) -> rustyline::Result<Option<String>> {
    match read {
        Ok(line) => Ok(Some(line)),
        // Ctrl-C drops the line being edited, like other shells.
        Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
        Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err),
    }
}
