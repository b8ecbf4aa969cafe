//! Utility functions for path handling shared by notes and categories

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Characters which cannot appear in a directory name on some filesystem
const RESERVED_CHARS: &[char] = &['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Abbreviate the current user's home directory in `path` with `~`.
///
/// Paths outside of the user's home are returned as-is. When the user's home
/// directory cannot be located, the path is returned unchanged.
pub fn canonicalize(path: &Path) -> String {
    let Some(home) = dirs::home_dir() else {
        return display_path(path);
    };
    match path.strip_prefix(&home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", display_path(rest)),
        Err(_) => display_path(path),
    }
}

/// Recompose a path which the filesystem may have handed back in decomposed
/// (NFD) form. HFS+ and APFS on macOS store file names decomposed.
#[cfg(target_os = "macos")]
pub fn normalize_for_filesystem(path: &Path) -> PathBuf {
    use unicode_normalization::UnicodeNormalization;

    match path.to_str() {
        Some(s) => PathBuf::from(s.nfc().collect::<String>()),
        None => path.to_path_buf(),
    }
}

/// Identity on filesystems which keep file names as written.
#[cfg(not(target_os = "macos"))]
pub fn normalize_for_filesystem(path: &Path) -> PathBuf {
    path.to_path_buf()
}

/// Validate one segment of a category as a directory name
pub fn validate_dir_name(name: &str) -> Result<()> {
    match dir_name_violation(name) {
        Some(reason) => Err(Error::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Why `name` cannot be used as a directory name, if it cannot
pub(crate) fn dir_name_violation(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("cannot be empty")
    } else if name.starts_with('.') {
        Some("cannot start with '.'")
    } else if name.contains(RESERVED_CHARS) {
        Some("cannot contain '/', '\\', '?', '%', '*', ':', '|', '\"', '<', '>' since they are reserved")
    } else {
        None
    }
}

/// Relative path of `path` from `base` joined with `/`.
///
/// Returns `None` when `path` is not under `base`. `base` itself yields an
/// empty string.
pub fn rel_slash_path(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Split a command line such as `vim -p` or `less -R` into words
pub fn split_command_line(what: &'static str, cmdline: &str) -> Result<Vec<String>> {
    shell_words::split(cmdline).map_err(|source| Error::InvalidCommandLine {
        what,
        cmdline: cmdline.to_string(),
        source,
    })
}

/// Display a path with forward slashes (cross-platform standard)
/// Converts Windows backslashes to forward slashes for consistent output
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_under_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let path = home.join("notes").join("a.md");
        assert_eq!(canonicalize(&path), "~/notes/a.md");
        assert_eq!(canonicalize(&home), "~");
    }

    #[test]
    fn test_canonicalize_outside_home() {
        let path = PathBuf::from("/definitely/not/home/a.md");
        assert_eq!(canonicalize(&path), "/definitely/not/home/a.md");
    }

    #[test]
    fn test_canonicalize_does_not_match_partial_component() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let mut sibling = home.clone().into_os_string();
        sibling.push("-other");
        let sibling = PathBuf::from(sibling).join("a.md");
        assert!(!canonicalize(&sibling).starts_with('~'));
    }

    #[test]
    fn test_validate_dir_name_ok() {
        assert!(validate_dir_name("foo-bar is.ok").is_ok());
        assert!(validate_dir_name("日本語").is_ok());
    }

    #[test]
    fn test_validate_dir_name_rejected() {
        for name in ["", ".hidden", "a\\b", "a?", "a%", "a*", "a:b", "a|b", "a\"b", "a<b", "a>b", "a/b"] {
            match validate_dir_name(name) {
                Err(Error::InvalidName { name: n, .. }) => assert_eq!(n, name),
                other => panic!("'{}' should be rejected but got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_rel_slash_path() {
        let base = PathBuf::from("/home/user/notes");
        assert_eq!(
            rel_slash_path(&base, &base.join("a").join("b")),
            Some("a/b".to_string())
        );
        assert_eq!(rel_slash_path(&base, &base), Some(String::new()));
        assert_eq!(rel_slash_path(&base, Path::new("/elsewhere/a")), None);
    }

    #[test]
    fn test_split_command_line() {
        assert_eq!(
            split_command_line("editor", "code --wait 'my dir'").unwrap(),
            vec!["code", "--wait", "my dir"]
        );
        assert!(matches!(
            split_command_line("pager", "less 'unterminated"),
            Err(Error::InvalidCommandLine { what: "pager", .. })
        ));
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_normalize_is_identity() {
        let decomposed = PathBuf::from("/tmp/cafe\u{301}.md");
        assert_eq!(normalize_for_filesystem(&decomposed), decomposed);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_normalize_recomposes() {
        let decomposed = PathBuf::from("/tmp/cafe\u{301}.md");
        assert_eq!(normalize_for_filesystem(&decomposed), PathBuf::from("/tmp/caf\u{e9}.md"));
    }
}
