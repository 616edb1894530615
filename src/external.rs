use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::error::ShellError;
use crate::interpreter::Factory;
use crate::session::Session;
use anyhow::Result;
use log::debug;
use std::ffi::OsString;
use std::io::Write;
use std::process::{ExitStatus, Stdio};

/// Command that is not a builtin.
///
/// The program is looked up by the OS the way `execvp` does, using the `PATH`
/// the shell inherited. Standard streams and the environment are inherited too.
pub struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: OsString, args: Vec<OsString>) -> Self {
        Self { program, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        _session: &Session,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name.is_empty() {
            return None;
        }
        Some(Box::new(ExternalCommand::new(
            name.into(),
            args.iter().map(|x| x.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(self: Box<Self>, _stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        let mut child = std::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .current_dir(session.current_dir())
            .spawn()
            .map_err(|source| ShellError::Spawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;
        debug!("spawned {:?} as pid {}", self.program, child.id());
        let exit_status = child.wait()?;
        debug!("pid {} finished: {exit_status}", child.id());
        match exit_status.code() {
            Some(x) => Ok(x),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}
