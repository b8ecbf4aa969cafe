//! User configuration resolution
//!
//! Resolves where notes live and which external tools are available:
//! - Notes home (`--home`, NOTES_CLI_HOME, XDG_DATA_HOME, platform data dir)
//! - Git executable (NOTES_CLI_GIT or `git` on $PATH)
//! - Editor command line (NOTES_CLI_EDITOR, EDITOR)
//! - Pager command line (NOTES_CLI_PAGER, PAGER, `less` fallback)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::constants as C;
use crate::error::{Error, Result};

/// Configuration of the notes command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Root directory of all categories. Created when the config is resolved
    pub home_path: PathBuf,
    /// Resolved `git` executable. `None` disables Git integration
    pub git_path: Option<PathBuf>,
    /// Editor command line, possibly with arguments
    pub editor_cmd: Option<String>,
    /// Pager command line, possibly with arguments
    pub pager_cmd: Option<String>,
}

impl Config {
    /// Resolve the configuration from the user's environment.
    ///
    /// `home_override` takes priority over every environment variable.
    pub fn from_env(home_override: Option<&str>) -> Result<Self> {
        let home = match home_override.filter(|h| !h.is_empty()) {
            Some(h) => PathBuf::from(h),
            None => home_path_from_env()?,
        };

        fs::create_dir_all(&home).map_err(|source| Error::CannotCreateHome {
            path: home.clone(),
            source,
        })?;
        let home_path = dunce::canonicalize(&home).unwrap_or(home);

        let config = Self {
            home_path,
            git_path: git_path_from_env(),
            editor_cmd: editor_from_env(),
            pager_cmd: pager_from_env(),
        };
        debug!(home = %config.home_path.display(), git = ?config.git_path, "resolved config");
        Ok(config)
    }

    /// Configuration rooted at `home` with no external tools
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home_path: home.into(),
            git_path: None,
            editor_cmd: None,
            pager_cmd: None,
        }
    }
}

/// Get an environment variable, treating empty strings as unset
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn home_path_from_env() -> Result<PathBuf> {
    // Priority 1: NOTES_CLI_HOME
    if let Some(home) = non_empty_var(C::ENV_HOME) {
        return Ok(PathBuf::from(home));
    }

    // Priority 2: XDG_DATA_HOME
    if let Some(xdg) = non_empty_var("XDG_DATA_HOME") {
        return Ok(PathBuf::from(xdg).join(C::HOME_DIRNAME));
    }

    // Priority 3: platform data directory, then ~/.local/share
    if let Some(data) = dirs::data_dir() {
        return Ok(data.join(C::HOME_DIRNAME));
    }
    dirs::home_dir()
        .map(|h| h.join(".local").join("share").join(C::HOME_DIRNAME))
        .ok_or(Error::HomeNotFound)
}

fn git_path_from_env() -> Option<PathBuf> {
    let cmd = non_empty_var(C::ENV_GIT).unwrap_or_else(|| "git".to_string());
    look_path(&cmd)
}

fn editor_from_env() -> Option<String> {
    [C::ENV_EDITOR, "EDITOR"].into_iter().find_map(non_empty_var)
}

fn pager_from_env() -> Option<String> {
    for key in [C::ENV_PAGER, "PAGER"] {
        match env::var(key) {
            // Explicitly empty disables paging
            Ok(v) if v.is_empty() => return None,
            Ok(v) => return Some(v),
            Err(_) => {}
        }
    }
    look_path("less").map(|_| C::DEFAULT_PAGER.to_string())
}

/// Find an executable by name on $PATH. Names containing a path separator are
/// checked as-is.
pub fn look_path(cmd: &str) -> Option<PathBuf> {
    let candidate = Path::new(cmd);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let exe = dir.join(cmd);
        if exe.is_file() {
            return Some(exe);
        }
        #[cfg(windows)]
        {
            let exe = exe.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_home_has_no_tools() {
        let config = Config::with_home("/tmp/notes");
        assert_eq!(config.home_path, PathBuf::from("/tmp/notes"));
        assert!(config.git_path.is_none());
        assert!(config.editor_cmd.is_none());
        assert!(config.pager_cmd.is_none());
    }

    #[test]
    fn test_from_env_override_creates_home() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("nested").join("home");
        let config = Config::from_env(Some(home.to_str().unwrap())).unwrap();
        assert!(home.is_dir());
        assert_eq!(config.home_path, dunce::canonicalize(&home).unwrap());
    }

    #[test]
    fn test_look_path_with_separator() {
        let temp_dir = TempDir::new().unwrap();
        let exe = temp_dir.path().join("tool");
        fs::write(&exe, "").unwrap();
        assert_eq!(look_path(exe.to_str().unwrap()), Some(exe.clone()));
        assert_eq!(look_path(temp_dir.path().join("missing").to_str().unwrap()), None);
    }
}
