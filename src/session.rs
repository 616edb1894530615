use crate::command::ExitCode;
use crate::prompt::{Identity, Prompt};
use log::warn;
use std::env as stdenv;
use std::path::{Path, PathBuf};

/// Mutable state of one interactive shell.
///
/// The session contains:
/// - `identity`: the user and host shown in the prompt.
/// - `current_dir`: mirror of the process working directory, which only `cd` changes.
/// - `prompt`: cached prompt text, recomputed whenever `current_dir` changes.
/// - `last_status`: exit code of the most recently executed command.
/// - `track_home`: whether the home directory is re-read from the user database
///   on every directory change.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    current_dir: PathBuf,
    prompt: Prompt,
    last_status: ExitCode,
    track_home: bool,
}

impl Session {
    /// Capture the current working directory and render the first prompt.
    ///
    /// The home directory follows the user database for the life of the session.
    pub fn new(identity: Identity) -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|err| {
            warn!("cannot read working directory: {err}");
            PathBuf::from(".")
        });
        Self {
            track_home: true,
            ..Self::with_current_dir(identity, current_dir)
        }
    }

    /// A session starting in `current_dir` whose identity, home included, stays
    /// exactly as given.
    pub fn with_current_dir(identity: Identity, current_dir: PathBuf) -> Self {
        let prompt = Prompt::render(&identity, &current_dir);
        Self {
            identity,
            current_dir,
            prompt,
            last_status: 0,
            track_home: false,
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Record a directory the process has already switched to.
    pub fn set_current_dir(&mut self, dir: PathBuf) {
        if self.track_home {
            self.identity.refresh_home();
        }
        self.prompt = Prompt::render(&self.identity, &dir);
        self.current_dir = dir;
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_str()
    }

    pub fn last_status(&self) -> ExitCode {
        self.last_status
    }

    pub fn set_last_status(&mut self, status: ExitCode) {
        self.last_status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            user_name: "bob".to_string(),
            host_name: "host".to_string(),
            home_dir: PathBuf::from("/home/bob"),
            is_superuser: false,
        }
    }

    #[test]
    fn test_prompt_follows_current_dir() {
        let mut session = Session::with_current_dir(identity(), PathBuf::from("/home/bob"));
        assert!(session.prompt().ends_with("@host ~> "));

        session.set_current_dir(PathBuf::from("/var/log"));
        assert_eq!(session.current_dir(), Path::new("/var/log"));
        assert!(session.prompt().ends_with("@host /var/log> "));
    }

    #[test]
    fn test_fixed_home_survives_directory_changes() {
        let mut session = Session::with_current_dir(identity(), PathBuf::from("/"));

        session.set_current_dir(PathBuf::from("/home/bob/src"));
        assert!(session.prompt().ends_with("@host ~/src> "));

        session.set_current_dir(PathBuf::from("/home/bob"));
        assert!(session.prompt().ends_with("@host ~> "));
    }

    #[test]
    fn test_last_status_starts_at_zero() {
        let mut session = Session::with_current_dir(identity(), PathBuf::from("/"));
        assert_eq!(session.last_status(), 0);
        session.set_last_status(127);
        assert_eq!(session.last_status(), 127);
    }
}
