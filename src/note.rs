//! Note model
//!
//! A note is a markdown file at `<home>/<category>/<file>.md` which starts with
//! an h1 title (setext style) followed by a metadata list:
//!
//! ```text
//! My title
//! ========
//! - Category: blog/rust
//! - Tags: foo, bar
//! - Created: 2018-10-30T11:37:45+09:00
//!
//! body...
//! ```
//!
//! The category in metadata must always agree with the directory the file
//! lives in.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, SubsecRound};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::constants as C;
use crate::error::{Error, Result};
use crate::util::{self, dir_name_violation, normalize_for_filesystem, rel_slash_path};

/// Markdown thematic break: https://spec.commonmark.org/0.28/#thematic-break
/// such as `---`, `***`, `___` or `  - -  -`
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s{0,3}(?:(?:-+\s*){3,}|(?:\*+\s*){3,}|(?:_+\s*){3,})$")
        .expect("thematic break pattern is valid")
});

/// A note stored on filesystem, or about to be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    #[serde(skip)]
    home_path: PathBuf,
    /// Slash separated category. Never empty
    pub category: String,
    /// Tags in declared order. Can be empty, never contains a comma
    pub tags: Vec<String>,
    /// When the note was created
    pub created: DateTime<FixedOffset>,
    /// File name of the note, always with the note extension
    pub file: String,
    /// Title of the note. May be empty for a note not created yet
    pub title: String,
}

impl Note {
    /// Build a new, not yet persisted note.
    ///
    /// Every `/` separated part of `category` must be a valid directory name.
    /// `tags` is a comma separated list. The note extension is appended to
    /// `file` when missing.
    pub fn create(category: &str, tags: &str, file: &str, title: &str, config: &Config) -> Result<Self> {
        let category = category.trim();
        let file = file.trim();
        let title = title.trim();

        for segment in category.split('/') {
            if let Some(reason) = dir_name_violation(segment) {
                return Err(Error::InvalidCategory {
                    segment: segment.to_string(),
                    reason,
                });
            }
        }

        if file.is_empty() || file.starts_with('.') {
            return Err(Error::EmptyFilename);
        }

        let mut file = file.to_string();
        if !file.ends_with(C::NOTE_EXTENSION) {
            file.push_str(C::NOTE_EXTENSION);
        }

        Ok(Self {
            home_path: config.home_path.clone(),
            category: category.to_string(),
            tags: parse_tags(tags),
            created: Local::now().trunc_subsecs(0).into(),
            file,
            title: title.to_string(),
        })
    }

    /// Load and parse the note file at `path`.
    ///
    /// Scanning stops as soon as the title and all metadata have been seen.
    pub fn load(path: &Path, config: &Config) -> Result<Self> {
        let path = normalize_for_filesystem(path);
        let home = normalize_for_filesystem(&config.home_path);

        let f = File::open(&path).map_err(|source| Error::CannotOpenOrRead {
            path: path.clone(),
            source,
        })?;

        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut title = String::new();
        let mut title_found = false;
        let mut category: Option<String> = None;
        let mut tags: Option<Vec<String>> = None;
        let mut created: Option<DateTime<FixedOffset>> = None;

        for line in BufReader::new(f).lines() {
            let line = line.map_err(|source| Error::CannotOpenOrRead {
                path: path.clone(),
                source,
            })?;

            if !title_found {
                if is_title_bar(&line) {
                    if title.is_empty() {
                        title = C::NO_TITLE.to_string();
                    }
                    title_found = true;
                } else {
                    title = line.trim().to_string();
                }
            } else if let Some(rest) = line.strip_prefix(C::CATEGORY_PREFIX) {
                let declared = rest.trim().to_string();
                let parent = path.parent().unwrap_or(Path::new(""));
                let expected = rel_slash_path(&home, parent);
                if expected.as_deref() != Some(declared.as_str()) {
                    return Err(Error::CategoryMismatch {
                        declared,
                        expected: expected.unwrap_or_else(|| util::display_path(parent)),
                        path,
                    });
                }
                category = Some(declared).filter(|c| !c.is_empty());
            } else if let Some(rest) = line.strip_prefix(C::TAGS_PREFIX) {
                tags = Some(parse_tags(rest));
            } else if let Some(rest) = line.strip_prefix(C::CREATED_PREFIX) {
                let parsed = DateTime::parse_from_rfc3339(rest.trim()).map_err(|source| {
                    Error::TimestampParseFailed {
                        line: line.clone(),
                        source,
                    }
                })?;
                created = Some(parsed);
            }

            if category.is_some() && tags.is_some() && created.is_some() {
                break;
            }
        }

        if !title_found {
            return Err(Error::NoTitleFound { path });
        }

        match (category, tags, created) {
            (Some(category), Some(tags), Some(created)) => {
                trace!(path = %path.display(), "loaded note");
                Ok(Self {
                    home_path: config.home_path.clone(),
                    category,
                    tags,
                    created,
                    file,
                    title,
                })
            }
            (category, tags, created) => {
                let mut missing = Vec::new();
                if category.is_none() {
                    missing.push("Category");
                }
                if tags.is_none() {
                    missing.push("Tags");
                }
                if created.is_none() {
                    missing.push("Created");
                }
                Err(Error::MissingMetadata { path, missing })
            }
        }
    }

    /// Absolute path of the category directory
    pub fn dir_path(&self) -> PathBuf {
        self.category
            .split('/')
            .fold(self.home_path.clone(), |dir, part| dir.join(part))
    }

    /// Absolute path of the note file
    pub fn file_path(&self) -> PathBuf {
        self.dir_path().join(&self.file)
    }

    /// Path of the note file relative to home
    pub fn rel_file_path(&self) -> PathBuf {
        let mut rel: PathBuf = self.category.split('/').collect();
        rel.push(&self.file);
        rel
    }

    /// Nearest template file from the category directory up to home
    pub fn template_path(&self) -> Option<PathBuf> {
        find_template(&self.dir_path(), &self.home_path, |p| p.is_file())
    }

    /// Write the note file. Fails when the file already exists; an existing
    /// note is never overwritten.
    pub fn persist(&self) -> Result<()> {
        let template = match self.template_path() {
            Some(path) => {
                debug!(template = %path.display(), "using template");
                let content = fs::read(&path).map_err(|source| Error::TemplateReadFailed {
                    path: path.clone(),
                    source,
                })?;
                Some(content)
            }
            None => None,
        };

        let content = self.render(template.as_deref());

        let dir = self.dir_path();
        fs::create_dir_all(&dir).map_err(|source| Error::DirectoryCreateFailed {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(&self.file);
        let mut f = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| {
                if source.kind() == io::ErrorKind::AlreadyExists {
                    Error::AlreadyExists { path: path.clone() }
                } else {
                    Error::WriteFailed {
                        path: path.clone(),
                        source,
                    }
                }
            })?;

        f.write_all(&content)
            .and_then(|_| f.flush())
            .map_err(|source| Error::WriteFailed { path, source })
    }

    /// Render the whole file content, inserting `template` after metadata
    fn render(&self, template: Option<&[u8]>) -> Vec<u8> {
        let title = if self.title.is_empty() {
            self.file
                .strip_suffix(C::NOTE_EXTENSION)
                .unwrap_or(&self.file)
        } else {
            self.title.as_str()
        };

        let mut out = String::new();
        out.push_str(title);
        out.push('\n');
        out.extend(std::iter::repeat(C::TITLE_UNDERLINE).take(title.width()));
        out.push('\n');

        // A template starting with `-->` expects metadata to be commented out
        if template.is_some_and(|t| t.starts_with(C::CLOSING_COMMENT.as_bytes())) {
            out.push_str(C::OPENING_COMMENT);
            out.push('\n');
        }

        out.push_str(C::CATEGORY_PREFIX);
        out.push_str(&self.category);
        out.push('\n');
        out.push_str(C::TAGS_PREFIX);
        out.push(' ');
        out.push_str(&self.tags.join(C::TAGS_SEPARATOR));
        out.push('\n');
        out.push_str(C::CREATED_PREFIX);
        out.push_str(&self.created.to_rfc3339_opts(SecondsFormat::Secs, true));
        out.push('\n');

        let mut bytes = out.into_bytes();
        match template {
            Some(t) if !t.is_empty() => bytes.extend_from_slice(t),
            // Separate metadata and body with an empty line
            _ => bytes.push(b'\n'),
        }
        bytes
    }

    /// Read the body up to `max_chars` characters.
    ///
    /// Returns the text and how many lines it spans. A multi-byte character is
    /// never split.
    pub fn read_body(&self, max_chars: usize) -> Result<(String, usize)> {
        let mut body = BodyReader::open(self)?;
        let mut text = String::new();
        let mut count = 0;
        let mut lines = 0;

        while count < max_chars {
            let Some(line) = body.next_line()? else {
                break;
            };
            lines += 1;
            for c in line.chars().take(max_chars - count) {
                text.push(c);
                count += 1;
            }
        }

        Ok((text, lines))
    }

    /// Read the body up to `max_lines` lines.
    ///
    /// Returns the text and the number of lines read. Callers can tell the
    /// body was truncated when the count reaches `max_lines`.
    pub fn read_body_lines(&self, max_lines: usize) -> Result<(String, usize)> {
        let mut body = BodyReader::open(self)?;
        let mut text = String::new();
        let mut lines = 0;

        while lines < max_lines {
            let Some(line) = body.next_line()? else {
                break;
            };
            text.push_str(&line);
            lines += 1;
        }

        Ok((text, lines))
    }
}

/// Reads a note body line by line, starting at the first line after metadata
/// which is not blank, not a thematic break and not the closing comment.
struct BodyReader {
    path: PathBuf,
    reader: BufReader<File>,
    first: Option<String>,
}

impl BodyReader {
    fn open(note: &Note) -> Result<Self> {
        let path = note.file_path();
        let f = File::open(&path).map_err(|source| Error::CannotOpenOrRead {
            path: path.clone(),
            source,
        })?;
        let mut body = Self {
            path,
            reader: BufReader::new(f),
            first: None,
        };
        body.skip_metadata()?;
        body.first = body.skip_leading_lines()?;
        Ok(body)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line)),
            Err(source) => Err(Error::CannotOpenOrRead {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn skip_metadata(&mut self) -> Result<()> {
        let (mut category, mut tags, mut created) = (false, false, false);
        while !(category && tags && created) {
            let Some(line) = self.read_line()? else {
                let missing = [(category, "Category"), (tags, "Tags"), (created, "Created")]
                    .into_iter()
                    .filter(|(seen, _)| !seen)
                    .map(|(_, name)| name)
                    .collect();
                return Err(Error::MissingMetadata {
                    path: self.path.clone(),
                    missing,
                });
            };
            if line.starts_with(C::CATEGORY_PREFIX) {
                category = true;
            } else if line.starts_with(C::TAGS_PREFIX) {
                tags = true;
            } else if line.starts_with(C::CREATED_PREFIX) {
                created = true;
            }
        }
        Ok(())
    }

    fn skip_leading_lines(&mut self) -> Result<Option<String>> {
        while let Some(line) = self.read_line()? {
            let content = line.trim_end_matches(['\n', '\r']);
            if !content.trim().is_empty()
                && !HORIZONTAL_RULE.is_match(content)
                && content != C::CLOSING_COMMENT
            {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.first.take() {
            Some(line) => Ok(Some(line)),
            None => self.read_line(),
        }
    }
}

/// Find the nearest template file walking up from `dir` to `home`
/// (both inclusive). The innermost template wins.
pub fn find_template(dir: &Path, home: &Path, is_file: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    let mut current = dir;
    loop {
        let candidate = current.join(C::TEMPLATE_FILENAME);
        if is_file(&candidate) {
            return Some(candidate);
        }
        if current == home {
            return None;
        }
        current = current.parent()?;
    }
}

/// Split comma separated tags, trimming and dropping empty ones
fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_title_bar(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == C::TITLE_UNDERLINE)
}
