//! Git repository at notes home

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};

/// Git command bound to one repository
#[derive(Debug, Clone)]
pub struct Git {
    bin: PathBuf,
    root: PathBuf,
}

impl Git {
    /// Git for the notes home. `None` when Git is not available
    pub fn new(config: &Config) -> Option<Self> {
        config.git_path.as_ref().map(|bin| Self {
            bin: bin.clone(),
            root: config.home_path.clone(),
        })
    }

    /// Root directory of the repository
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `.git` exists at the root
    pub fn is_repository(&self) -> bool {
        self.root.join(".git").is_dir()
    }

    /// Run `git -C <root> <args>`. Returns combined output, folded into one
    /// line on failure.
    fn exec(&self, action: &str, args: &[&str]) -> Result<String> {
        debug!(root = %self.root.display(), ?args, "running git");
        let failed = |output: String| Error::GitFailed {
            action: action.to_string(),
            root: self.root.clone(),
            output,
        };

        let output = Command::new(&self.bin)
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()
            .map_err(|err| failed(err.to_string()))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = combined.trim_end_matches('\n').to_string();

        if output.status.success() {
            Ok(combined)
        } else {
            Err(failed(combined.replace('\n', " ")))
        }
    }

    /// `git init`, unless the repository already exists
    pub fn init(&self) -> Result<()> {
        if self.is_repository() {
            return Ok(());
        }
        self.exec("cannot init Git repository", &["init"]).map(|_| ())
    }

    /// `git add -A`
    pub fn add_all(&self) -> Result<()> {
        self.exec("cannot add changes to index tree", &["add", "-A"])
            .map(|_| ())
    }

    /// `git commit -m <msg>`
    pub fn commit(&self, msg: &str) -> Result<()> {
        self.exec("cannot commit changes to repository", &["commit", "-m", msg])
            .map(|_| ())
    }

    /// Remote and branch tracked by the current branch, e.g. `("origin", "main")`
    pub fn tracking_remote(&self) -> Result<(String, String)> {
        let action = "cannot retrieve remote name";
        let out = self.exec(action, &["rev-parse", "--abbrev-ref", "--symbolic", "@{u}"])?;
        match out.split_once('/') {
            Some((remote, branch)) => Ok((remote.to_string(), branch.to_string())),
            None => Err(Error::GitFailed {
                action: action.to_string(),
                root: self.root.clone(),
                output: out,
            }),
        }
    }

    /// `git push -u <remote> <branch>`
    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let action = format!("cannot push changes to {}/{}", remote, branch);
        self.exec(&action, &["push", "-u", remote, branch]).map(|_| ())
    }
}
