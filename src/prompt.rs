//! Who is running the shell, and the prompt built from it.

use crate::error::ShellError;
use log::warn;
use nix::unistd::{self, Uid, User};
use std::path::{Path, PathBuf};

const SUPERUSER_COLOR: u8 = 31;
const USER_COLOR: u8 = 34;

/// The owner of the shell process as shown in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_name: String,
    pub host_name: String,
    pub home_dir: PathBuf,
    pub is_superuser: bool,
}

impl Identity {
    /// Look up the effective user and the local host name.
    pub fn resolve() -> Result<Self, ShellError> {
        let uid = unistd::geteuid();
        let user = lookup_user(uid)?;
        let host_name = unistd::gethostname()
            .map_err(ShellError::HostName)?
            .to_string_lossy()
            .into_owned();
        Ok(Self {
            user_name: user.name,
            host_name,
            home_dir: user.dir,
            is_superuser: uid.is_root(),
        })
    }

    /// Re-read the home directory from the user database.
    ///
    /// The previous value is kept if the lookup fails.
    pub fn refresh_home(&mut self) {
        match lookup_user(unistd::geteuid()) {
            Ok(user) => self.home_dir = user.dir,
            Err(err) => warn!("keeping home {}: {err}", self.home_dir.display()),
        }
    }
}

fn lookup_user(uid: Uid) -> Result<User, ShellError> {
    User::from_uid(uid)
        .map_err(ShellError::Identity)?
        .ok_or(ShellError::UnknownUser(uid))
}

/// A rendered prompt, e.g. `user@host ~/src> ` with the user name colored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn render(identity: &Identity, current_dir: &Path) -> Self {
        let color = if identity.is_superuser {
            SUPERUSER_COLOR
        } else {
            USER_COLOR
        };
        Self(format!(
            "\x1b[{color}m\x1b[1m{}\x1b[0m@{} {}> ",
            identity.user_name,
            identity.host_name,
            abbreviate_home(current_dir, &identity.home_dir)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display `dir` with the home directory replaced by `~`.
pub fn abbreviate_home(dir: &Path, home: &Path) -> String {
    if home.as_os_str().is_empty() || home == Path::new("/") {
        return dir.display().to_string();
    }
    match dir.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => dir.display().to_string(),
    }
}
