//! Opening notes with the user's editor

use std::io;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::util::split_command_line;

/// Open `paths` with the configured editor, waiting until it exits.
///
/// The editor runs in the notes home with the terminal inherited.
pub fn open_editor(config: &Config, paths: &[PathBuf]) -> Result<()> {
    let cmdline = config.editor_cmd.as_deref().ok_or(Error::NoEditor)?;
    let words = split_command_line("editor", cmdline)?;
    let (editor, args) = words.split_first().ok_or(Error::NoEditor)?;

    debug!(editor = %editor, files = paths.len(), "opening editor");
    let status = Command::new(editor)
        .args(args)
        .args(paths)
        .current_dir(&config.home_path)
        .status()
        .map_err(|source| Error::EditorFailed {
            editor: editor.clone(),
            source,
        })?;

    if !status.success() {
        return Err(Error::EditorFailed {
            editor: editor.clone(),
            source: io::Error::new(io::ErrorKind::Other, status.to_string()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_editor() {
        let config = Config::with_home("/tmp");
        assert!(matches!(open_editor(&config, &[]), Err(Error::NoEditor)));
    }

    #[test]
    fn test_blank_editor() {
        let mut config = Config::with_home("/tmp");
        config.editor_cmd = Some("   ".to_string());
        assert!(matches!(open_editor(&config, &[]), Err(Error::NoEditor)));
    }

    #[test]
    fn test_editor_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::with_home(temp_dir.path());
        config.editor_cmd = Some("this-editor-does-not-exist --wait".to_string());
        match open_editor(&config, &[temp_dir.path().join("a.md")]) {
            Err(Error::EditorFailed { editor, .. }) => assert_eq!(editor, "this-editor-does-not-exist"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_editor_receives_paths() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::with_home(temp_dir.path());
        config.editor_cmd = Some("touch".to_string());
        let paths = vec![temp_dir.path().join("x.md"), temp_dir.path().join("y.md")];
        open_editor(&config, &paths).unwrap();
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[cfg(unix)]
    #[test]
    fn test_editor_exit_failure() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::with_home(temp_dir.path());
        config.editor_cmd = Some("false".to_string());
        assert!(matches!(open_editor(&config, &[]), Err(Error::EditorFailed { .. })));
    }
}
