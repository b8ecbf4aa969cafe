//! Orderings of note lists
//!
//! All sorts are stable: notes with equal keys keep their input order.

use std::fs;
use std::time::SystemTime;

use crate::error::{Error, Result};
use crate::note::Note;

/// Key a note list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortBy {
    /// Most recently created first
    #[default]
    Created,
    /// File name
    Filename,
    /// Category, then file name
    Category,
    /// Most recently modified first
    Modified,
}

/// Sort by creation time, the latest first
pub fn sort_by_created(notes: &mut [Note]) {
    notes.sort_by(|l, r| r.created.cmp(&l.created));
}

/// Sort by file name only, ignoring category
pub fn sort_by_filename(notes: &mut [Note]) {
    notes.sort_by(|l, r| l.file.cmp(&r.file));
}

/// Sort by category, then by file name within a category
pub fn sort_by_category(notes: &mut [Note]) {
    notes.sort_by(|l, r| l.category.cmp(&r.category).then_with(|| l.file.cmp(&r.file)));
}

/// Sort by modification time of the files, the latest first.
///
/// Each file is stat'ed exactly once. When any stat fails the order of
/// `notes` is unspecified.
pub fn sort_by_modified(notes: &mut Vec<Note>) -> Result<()> {
    let times = notes
        .iter()
        .map(|note| {
            let path = note.file_path();
            fs::metadata(&path)
                .and_then(|m| m.modified())
                .map_err(|source| Error::ModTimeProbeFailed { path, source })
        })
        .collect::<Result<Vec<SystemTime>>>()?;

    let mut keyed: Vec<(SystemTime, Note)> = times.into_iter().zip(notes.drain(..)).collect();
    keyed.sort_by(|l, r| r.0.cmp(&l.0));
    notes.extend(keyed.into_iter().map(|(_, note)| note));
    Ok(())
}

/// Sort with the given key
pub fn sort_notes(notes: &mut Vec<Note>, by: SortBy) -> Result<()> {
    match by {
        SortBy::Created => sort_by_created(notes),
        SortBy::Filename => sort_by_filename(notes),
        SortBy::Category => sort_by_category(notes),
        SortBy::Modified => sort_by_modified(notes)?,
    }
    Ok(())
}
