//! What the binary does before and after the interactive loop.
//!
//! Failing to identify the user or host stops the shell before the first prompt.
//! Errors inside the loop never get this far: [`Interpreter::execute_line`]
//! reports them and keeps going.
//!
//! [`Interpreter::execute_line`]: crate::Interpreter::execute_line

use crate::error::ShellError;
use crate::prompt::Identity;
use crate::session::Session;
use crate::{PROGRAM_NAME, version_banner};
use anyhow::Result;
use log::info;
use std::io::Write;

/// Print the banner if asked, build the session and hand it to `shell`.
///
/// The banner comes first and does not stop the shell from starting.
pub fn start<F>(
    identity: Result<Identity, ShellError>,
    show_version: bool,
    stdout: &mut dyn Write,
    shell: F,
) -> Result<()>
where
    F: FnOnce(Session) -> Result<()>,
{
    if show_version {
        writeln!(stdout, "{}", version_banner())?;
    }

    // Without a user and host there is no prompt.
    let identity = identity?;
    info!("starting as {}@{}", identity.user_name, identity.host_name);

    shell(Session::new(identity))
}

/// Report the outcome of [`start`] and turn it into the process exit status.
pub fn exit_status(outcome: Result<()>, stderr: &mut dyn Write) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(err) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {err:#}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Interpreter, LoopControl};
    use nix::errno::Errno;
    use std::path::PathBuf;

    fn identity() -> Identity {
        Identity {
            user_name: "tester".to_string(),
            host_name: "localhost".to_string(),
            home_dir: PathBuf::from("/nonexistent-home"),
            is_superuser: false,
        }
    }

    #[test]
    fn test_host_name_failure_is_fatal() {
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let mut started = false;

        let outcome = start(Err(ShellError::HostName(Errno::EFAULT)), false, &mut out, |_| {
            started = true;
            Ok(())
        });
        let status = exit_status(outcome, &mut err);

        assert_eq!(status, 1);
        assert!(!started);
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("mish: cannot resolve host name: "), "unexpected stderr: {err}");
    }

    #[test]
    fn test_identity_failure_is_fatal() {
        let mut err: Vec<u8> = Vec::new();
        let outcome = start(
            Err(ShellError::Identity(Errno::EIO)),
            false,
            &mut std::io::sink(),
            |_| Ok(()),
        );

        assert_eq!(exit_status(outcome, &mut err), 1);
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("mish: cannot resolve user identity: "), "unexpected stderr: {err}");
    }

    #[test]
    fn test_version_banner_then_loop_starts() {
        let mut out: Vec<u8> = Vec::new();
        let mut started = false;

        let outcome = start(Ok(identity()), true, &mut out, |session| {
            started = true;
            assert!(session.prompt().contains("tester"));
            Ok(())
        });

        assert_eq!(exit_status(outcome, &mut std::io::sink()), 0);
        assert!(started);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", version_banner()));
    }

    #[test]
    fn test_version_banner_is_printed_even_when_startup_fails() {
        let mut out: Vec<u8> = Vec::new();
        let unknown = ShellError::UnknownUser(nix::unistd::Uid::from_raw(4242));
        let outcome = start(Err(unknown), true, &mut out, |_| Ok(()));

        assert_eq!(exit_status(outcome, &mut std::io::sink()), 1);
        assert!(String::from_utf8(out).unwrap().starts_with("mish "));
    }

    #[test]
    fn test_loop_errors_do_not_change_exit_status() {
        let mut err: Vec<u8> = Vec::new();
        let outcome = start(Ok(identity()), false, &mut std::io::sink(), |session| {
            let mut sh = Interpreter::with_default_commands(session);
            let mut loop_err: Vec<u8> = Vec::new();
            assert_eq!(
                sh.execute_line("cd", &mut std::io::sink(), &mut loop_err),
                LoopControl::Continue
            );
            assert_eq!(
                sh.execute_line("mish-no-such-program", &mut std::io::sink(), &mut loop_err),
                LoopControl::Continue
            );
            assert!(!loop_err.is_empty());
            assert_eq!(
                sh.execute_line("exit", &mut std::io::sink(), &mut loop_err),
                LoopControl::Exit
            );
            Ok(())
        });

        assert_eq!(exit_status(outcome, &mut err), 0);
        assert!(err.is_empty());
    }
}
