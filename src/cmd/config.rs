//! Output config command module

use std::io::Write;
use std::path::Path;

use notes_cli::{Config, Error, Result};

pub fn run(config: &Config, name: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let home = config.home_path.display().to_string();
    let git = config
        .git_path
        .as_deref()
        .map(Path::display)
        .map(|p| p.to_string())
        .unwrap_or_default();
    let editor = config.editor_cmd.clone().unwrap_or_default();
    let pager = config.pager_cmd.clone().unwrap_or_default();

    match name.unwrap_or("").to_lowercase().as_str() {
        "" => write!(out, "HOME={}\nGIT={}\nEDITOR={}\nPAGER={}\n", home, git, editor, pager)?,
        "home" => writeln!(out, "{}", home)?,
        "git" => writeln!(out, "{}", git)?,
        "editor" => writeln!(out, "{}", editor)?,
        "pager" => writeln!(out, "{}", pager)?,
        _ => return Err(Error::UnknownConfigName(name.unwrap_or_default().to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config() -> Config {
        let mut config = Config::with_home("/path/to/home");
        config.git_path = Some(PathBuf::from("/usr/bin/git"));
        config.editor_cmd = Some("vim -g".to_string());
        config
    }

    fn output(name: Option<&str>) -> String {
        let mut buf = Vec::new();
        run(&config(), name, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_config_all() {
        let expected = format!(
            "HOME={}\nGIT={}\nEDITOR=vim -g\nPAGER=\n",
            Path::new("/path/to/home").display(),
            Path::new("/usr/bin/git").display()
        );
        assert_eq!(output(None), expected);
    }

    #[test]
    fn test_config_single_value() {
        assert_eq!(output(Some("editor")), "vim -g\n");
        assert_eq!(output(Some("HOME")), format!("{}\n", Path::new("/path/to/home").display()));
        assert_eq!(output(Some("pager")), "\n");
    }

    #[test]
    fn test_config_unknown_name() {
        let mut buf = Vec::new();
        assert!(matches!(
            run(&config(), Some("shell"), &mut buf),
            Err(Error::UnknownConfigName(name)) if name == "shell"
        ));
    }
}
