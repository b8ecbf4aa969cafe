//! Category collection
//!
//! A category is a directory under home which directly contains at least one
//! note. Categories nest: `blog/rust` is a category distinct from `blog`.
//! Hidden directories (`.git`, `.template`, ...) are never walked.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::config::Config;
use crate::constants as C;
use crate::error::{Error, Result};
use crate::note::Note;
use crate::util::{normalize_for_filesystem, rel_slash_path};

/// A category directory and the notes found directly in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Absolute path of the category directory
    pub path: PathBuf,
    /// Slash separated path from home
    pub name: String,
    /// Absolute paths of notes, in directory enumeration order
    pub note_paths: Vec<PathBuf>,
}

impl Category {
    /// Load every note of the category. The first failure aborts loading
    pub fn notes(&self, config: &Config) -> Result<Vec<Note>> {
        self.note_paths
            .iter()
            .map(|p| Note::load(p, config))
            .collect()
    }
}

/// Categories keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories(HashMap<String, Category>);

impl Categories {
    /// All category names, in no particular order
    pub fn names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Load every note of every category. The first failure aborts loading.
    /// Notes are not ordered across categories
    pub fn notes(&self, config: &Config) -> Result<Vec<Note>> {
        let total = self.0.values().map(|c| c.note_paths.len()).sum();
        let mut notes = Vec::with_capacity(total);
        for category in self.0.values() {
            for path in &category.note_paths {
                notes.push(Note::load(path, config)?);
            }
        }
        Ok(notes)
    }
}

impl Deref for Categories {
    type Target = HashMap<String, Category>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Categories {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl IntoIterator for Categories {
    type Item = (String, Category);
    type IntoIter = std::collections::hash_map::IntoIter<String, Category>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// How much of the tree to collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectMode {
    /// Every category and every note
    #[default]
    All,
    /// Stop at the first note found. The result holds exactly one category
    /// with exactly one note, or nothing
    OnlyFirstCategory,
}

/// What the walker should do after visiting an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep going (and descend when the entry is a directory)
    Continue,
    /// Do not descend into this directory
    Prune,
    /// Stop the whole walk
    Stop,
}

/// Walk `root` depth first, calling `visitor` with each entry path and whether
/// it is a directory. `root` itself is visited first.
///
/// Returns `Visit::Stop` when the visitor stopped the walk.
pub fn walk_dir<F>(root: &Path, visitor: &mut F) -> Result<Visit>
where
    F: FnMut(&Path, bool) -> Result<Visit>,
{
    match visitor(root, true)? {
        Visit::Continue => {}
        Visit::Prune => return Ok(Visit::Continue),
        Visit::Stop => return Ok(Visit::Stop),
    }

    let walk_err = |source: io::Error| Error::CannotWalkCategory {
        category: category_of(root),
        path: root.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(root).map_err(walk_err)? {
        let entry = entry.map_err(walk_err)?;
        let path = entry.path();
        let is_dir = entry.file_type().map_err(walk_err)?.is_dir();

        let visit = if is_dir {
            walk_dir(&path, visitor)?
        } else {
            visitor(&path, false)?
        };
        if visit == Visit::Stop {
            return Ok(Visit::Stop);
        }
    }

    Ok(Visit::Continue)
}

/// Top-level directory name of `path`, used to report walk failures
fn category_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map_or(false, |n| n.to_string_lossy().starts_with('.'))
}

fn is_note_file(path: &Path) -> bool {
    path.file_name().map_or(false, |n| {
        let name = n.to_string_lossy();
        !name.starts_with('.') && name.ends_with(C::NOTE_EXTENSION)
    })
}

/// Collect categories under the configured home
pub fn collect_categories(config: &Config, mode: CollectMode) -> Result<Categories> {
    let home = normalize_for_filesystem(&config.home_path);
    let read_home_err = |source| Error::CannotReadHome {
        path: config.home_path.clone(),
        source,
    };

    let mut cats: HashMap<String, Category> = HashMap::new();

    for entry in fs::read_dir(&config.home_path).map_err(read_home_err)? {
        let entry = entry.map_err(read_home_err)?;
        let is_dir = entry.file_type().map_err(read_home_err)?.is_dir();
        let root = entry.path();
        if !is_dir || is_hidden(&root) {
            continue;
        }

        let visit = walk_dir(&root, &mut |path: &Path, is_dir: bool| {
            let path = normalize_for_filesystem(path);

            if is_dir {
                if is_hidden(&path) {
                    trace!(path = %path.display(), "pruned hidden directory");
                    return Ok(Visit::Prune);
                }
                if let Some(name) = rel_slash_path(&home, &path) {
                    cats.insert(
                        name.clone(),
                        Category {
                            path,
                            name,
                            note_paths: Vec::new(),
                        },
                    );
                }
                return Ok(Visit::Continue);
            }

            if !is_note_file(&path) {
                return Ok(Visit::Continue);
            }

            let parent = path.parent().and_then(|p| rel_slash_path(&home, p));
            if let Some(cat) = parent.and_then(|name| cats.get_mut(&name)) {
                cat.note_paths.push(path);
                if mode == CollectMode::OnlyFirstCategory {
                    return Ok(Visit::Stop);
                }
            }
            Ok(Visit::Continue)
        })?;

        if visit == Visit::Stop {
            break;
        }
    }

    cats.retain(|name, cat| {
        let keep = !cat.note_paths.is_empty();
        if !keep {
            debug!(category = %name, "discarded directory without notes");
        }
        keep
    });

    Ok(Categories(cats))
}

/// Load every note under `root` and pass it to `visitor` with its path.
///
/// Hidden directories are skipped. The first load or visitor error aborts
/// the walk.
pub fn walk_notes<F>(root: &Path, config: &Config, mut visitor: F) -> Result<()>
where
    F: FnMut(&Path, &Note) -> Result<()>,
{
    walk_dir(root, &mut |path: &Path, is_dir: bool| {
        if is_dir {
            // The root itself is walked even when given as a hidden path
            if path != root && is_hidden(path) {
                return Ok(Visit::Prune);
            }
            return Ok(Visit::Continue);
        }
        if !is_note_file(path) {
            return Ok(Visit::Continue);
        }
        let note = Note::load(path, config)?;
        visitor(path, &note)?;
        Ok(Visit::Continue)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn note_content(category: &str) -> String {
        format!(
            "title\n=====\n- Category: {}\n- Tags: foo, bar\n- Created: 2018-10-30T11:37:45+09:00\n\nbody\n",
            category
        )
    }

    fn write_note(home: &Path, category: &str, file: &str) -> PathBuf {
        let dir = category.split('/').fold(home.to_path_buf(), |d, p| d.join(p));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, note_content(category)).unwrap();
        path
    }

    fn sorted_names(cats: &Categories) -> Vec<String> {
        let mut names = cats.names();
        names.sort();
        names
    }

    #[test]
    fn test_collect_single_category() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        let path = write_note(temp_dir.path(), "a", "1.md");

        let cats = collect_categories(&config, CollectMode::All).unwrap();
        assert_eq!(cats.len(), 1);
        let cat = &cats["a"];
        assert_eq!(cat.name, "a");
        assert_eq!(cat.path, temp_dir.path().join("a"));
        assert_eq!(cat.note_paths, vec![path.clone()]);

        let notes = cat.notes(&config).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].tags, vec!["foo", "bar"]);
        assert_eq!(notes[0].file_path(), path);
    }

    #[test]
    fn test_collect_nested_categories() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        write_note(temp_dir.path(), "a", "1.md");
        write_note(temp_dir.path(), "a", "2.md");
        write_note(temp_dir.path(), "a/b", "3.md");
        write_note(temp_dir.path(), "c/d/e", "4.md");

        let cats = collect_categories(&config, CollectMode::All).unwrap();
        assert_eq!(sorted_names(&cats), vec!["a", "a/b", "c/d/e"]);
        assert_eq!(cats["a"].note_paths.len(), 2);
        assert_eq!(cats["a/b"].note_paths.len(), 1);

        let notes = cats.notes(&config).unwrap();
        assert_eq!(notes.len(), 4);
    }

    #[test]
    fn test_collect_discards_empty_categories() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        write_note(temp_dir.path(), "a", "1.md");
        fs::create_dir_all(temp_dir.path().join("empty").join(".hidden")).unwrap();
        fs::write(temp_dir.path().join("empty").join("readme.txt"), "not a note").unwrap();
        fs::write(temp_dir.path().join("empty").join(".hidden").join("x.md"), note_content("empty/.hidden")).unwrap();
        fs::write(temp_dir.path().join("empty").join(".dot.md"), "hidden note").unwrap();

        let cats = collect_categories(&config, CollectMode::All).unwrap();
        assert_eq!(sorted_names(&cats), vec!["a"]);
    }

    #[test]
    fn test_collect_prunes_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        write_note(temp_dir.path(), "a", "1.md");
        for hidden in [".git", ".template", "a/.git", "a/.template"] {
            let dir = temp_dir.path().join(hidden);
            fs::create_dir_all(dir.join("sub")).unwrap();
            fs::write(dir.join("x.md"), "x").unwrap();
            fs::write(dir.join("sub").join("y.md"), "y").unwrap();
        }

        let cats = collect_categories(&config, CollectMode::All).unwrap();
        assert_eq!(sorted_names(&cats), vec!["a"]);
        assert_eq!(cats["a"].note_paths.len(), 1);
    }

    #[test]
    fn test_collect_ignores_files_in_home() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        fs::write(temp_dir.path().join("top.md"), "x").unwrap();
        fs::write(temp_dir.path().join(".template.md"), "x").unwrap();

        let cats = collect_categories(&config, CollectMode::All).unwrap();
        assert!(cats.is_empty());
    }

    #[test]
    fn test_collect_first_match_only() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        write_note(temp_dir.path(), "a", "1.md");
        write_note(temp_dir.path(), "a", "2.md");
        write_note(temp_dir.path(), "b", "3.md");
        write_note(temp_dir.path(), "b/c", "4.md");

        let cats = collect_categories(&config, CollectMode::OnlyFirstCategory).unwrap();
        assert_eq!(cats.len(), 1);
        let cat = cats.values().next().unwrap();
        assert_eq!(cat.note_paths.len(), 1);
    }

    #[test]
    fn test_collect_cannot_read_home() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path().join("missing"));
        assert!(matches!(
            collect_categories(&config, CollectMode::All),
            Err(Error::CannotReadHome { .. })
        ));
    }

    #[test]
    fn test_notes_aborts_on_broken_note() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        write_note(temp_dir.path(), "a", "1.md");
        fs::write(temp_dir.path().join("a").join("broken.md"), "no metadata\n").unwrap();

        let cats = collect_categories(&config, CollectMode::All).unwrap();
        assert_eq!(cats["a"].note_paths.len(), 2);
        assert!(cats["a"].notes(&config).is_err());
        assert!(cats.notes(&config).is_err());
    }

    #[test]
    fn test_walk_notes() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        write_note(temp_dir.path(), "a", "1.md");
        write_note(temp_dir.path(), "a/b", "2.md");
        fs::create_dir_all(temp_dir.path().join("a").join(".git")).unwrap();
        fs::write(temp_dir.path().join("a").join(".git").join("x.md"), "x").unwrap();

        let mut seen = Vec::new();
        walk_notes(temp_dir.path(), &config, |path, note| {
            assert_eq!(path, note.file_path());
            seen.push(note.category.clone());
            Ok(())
        })
        .unwrap();
        seen.sort();
        assert_eq!(seen, vec!["a", "a/b"]);
    }

    #[test]
    fn test_walk_notes_visitor_error_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        write_note(temp_dir.path(), "a", "1.md");
        write_note(temp_dir.path(), "a", "2.md");

        let mut calls = 0;
        let result = walk_notes(temp_dir.path(), &config, |_, _| {
            calls += 1;
            Err(Error::EmptyFilename)
        });
        assert!(matches!(result, Err(Error::EmptyFilename)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_walk_dir_stop() {
        let temp_dir = TempDir::new().unwrap();
        write_note(temp_dir.path(), "a", "1.md");
        write_note(temp_dir.path(), "b", "2.md");

        let mut files = 0;
        let visit = walk_dir(temp_dir.path(), &mut |_: &Path, is_dir: bool| {
            if is_dir {
                return Ok(Visit::Continue);
            }
            files += 1;
            Ok(Visit::Stop)
        })
        .unwrap();
        assert_eq!(visit, Visit::Stop);
        assert_eq!(files, 1);
    }
}
