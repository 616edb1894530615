use nix::errno::Errno;
use nix::unistd::Uid;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures the shell knows how to name.
///
/// Identity and host name errors are only produced while building the prompt at
/// startup and are fatal there. Everything else is reported by the loop and the
/// shell moves on to the next line.
///
/// Messages leave the OS error out; it is reachable through `source()` and shows
/// up when the error is printed with `{:#}` through `anyhow`.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{command}: missing {argument} argument")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("{command}: {message}")]
    Usage {
        command: &'static str,
        message: String,
    },
    #[error("no user entry for uid {0}")]
    UnknownUser(Uid),
    #[error("cannot resolve user identity")]
    Identity(#[source] Errno),
    #[error("cannot resolve host name")]
    HostName(#[source] Errno),
    #[error("{program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("cd: {}", target.display())]
    ChangeDirectory {
        target: PathBuf,
        #[source]
        source: io::Error,
    },
}
