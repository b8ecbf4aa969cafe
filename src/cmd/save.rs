//! Save notes command module
//!
//! Commits every change under notes home and pushes it to `origin` when the
//! current branch tracks a branch there.

use chrono::{Local, SecondsFormat};
use notes_cli::git::Git;
use notes_cli::{Config, Error, Result};
use tracing::{debug, info};

const PUSH_REMOTE: &str = "origin";

pub fn run(config: &Config, message: Option<&str>) -> Result<()> {
    let git = Git::new(config).ok_or(Error::GitNotFound)?;
    if !git.is_repository() {
        return Err(Error::NotARepository {
            path: git.root().to_path_buf(),
        });
    }

    git.add_all()?;

    let msg = match message.filter(|m| !m.is_empty()) {
        Some(m) => m.to_string(),
        None => default_message(),
    };
    git.commit(&msg)?;
    info!(message = %msg, "committed notes");

    match git.tracking_remote() {
        Ok((remote, branch)) if remote == PUSH_REMOTE => git.push(&remote, &branch),
        Ok((remote, _)) => {
            debug!(%remote, "tracking remote is not origin, skip pushing");
            Ok(())
        }
        Err(err) => {
            debug!(%err, "no tracking remote, skip pushing");
            Ok(())
        }
    }
}

fn default_message() -> String {
    format!(
        "Saved by notes CLI at {}",
        Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
    )
}
