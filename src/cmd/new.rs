//! Create note command module

use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Read, Write};

use notes_cli::editor::open_editor;
use notes_cli::git::Git;
use notes_cli::{Config, Error, Note, Result};
use tracing::info;

pub fn run(config: &Config, category: &str, filename: &str, tags: &str, no_inline_input: bool) -> Result<()> {
    if let Some(git) = Git::new(config) {
        git.init()?;
    }

    let note = Note::create(category, tags, filename, "", config)?;
    note.persist()?;
    info!(path = %note.file_path().display(), "created note");

    if let Err(err) = open_editor(config, &[note.file_path()]) {
        eprintln!("{}", err);
        if !no_inline_input && io::stdin().is_terminal() {
            return fallback_input(&note);
        }
        // Final fallback is only showing the path so that users can open it by themselves
        println!("{}", note.file_path().display());
    }

    Ok(())
}

/// Read the body from stdin and append it to the note
fn fallback_input(note: &Note) -> Result<()> {
    eprintln!("Input notes inline (Ctrl+D to stop):");
    let body = read_from_stdin()?;

    let path = note.file_path();
    let write_err = |source| Error::WriteFailed {
        path: path.clone(),
        source,
    };
    let mut f = OpenOptions::new().append(true).open(&path).map_err(write_err)?;
    f.write_all(body.as_bytes()).map_err(write_err)?;

    eprintln!();
    println!("{}", path.display());
    Ok(())
}

/// Read all content from stdin
fn read_from_stdin() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
