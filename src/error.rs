//! Error types for notes-cli operations

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::util::canonicalize;

/// Unified error type for the note store and the commands built on it
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read home directory '{}'", canonicalize(.path))]
    CannotReadHome {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot walk on directory '{}' for category '{category}'", canonicalize(.path))]
    CannotWalkCategory {
        category: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("invalid category part '{segment}' as directory name: {reason}")]
    InvalidCategory { segment: String, reason: &'static str },

    #[error("file name cannot be empty and cannot start with '.'")]
    EmptyFilename,

    #[error("cannot create new note since file '{}' already exists. Please edit it", canonicalize(.path))]
    AlreadyExists { path: PathBuf },

    #[error("could not create category directory '{}'", canonicalize(.path))]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write note file '{}'", canonicalize(.path))]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read template file '{}'", canonicalize(.path))]
    TemplateReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open or read note file '{}'", canonicalize(.path))]
    CannotOpenOrRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "category does not match to file path. Category is '{declared}' but it should be '{expected}' from its file path '{}'",
        canonicalize(.path)
    )]
    CategoryMismatch {
        declared: String,
        expected: String,
        path: PathBuf,
    },

    #[error("cannot parse created date time as RFC3339 format: {line}")]
    TimestampParseFailed {
        line: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("no title found in note '{}'. Didn't you use '====' bar for h1 title?", canonicalize(.path))]
    NoTitleFound { path: PathBuf },

    #[error(
        "missing metadata {} in file '{}'. 'Category', 'Tags', 'Created' are mandatory",
        .missing.join(", "),
        canonicalize(.path)
    )]
    MissingMetadata {
        path: PathBuf,
        missing: Vec<&'static str>,
    },

    #[error("cannot sort by modified time: failed to stat '{}'", canonicalize(.path))]
    ModTimeProbeFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("regular expression for filtering {what} is invalid")]
    InvalidRegex {
        what: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("editor is not set. To open note in editor, please set $NOTES_CLI_EDITOR or $EDITOR")]
    NoEditor,

    #[error("editor command '{editor}' did not exit successfully")]
    EditorFailed {
        editor: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {what} command line '{cmdline}'")]
    InvalidCommandLine {
        what: &'static str,
        cmdline: String,
        #[source]
        source: shell_words::ParseError,
    },

    #[error("'save' command cannot work without Git. Please check Git command listed in output of 'config' command is available")]
    GitNotFound,

    #[error("'.git' directory does not exist in home '{}'. Please create a new note with `notes new` at first", canonicalize(.path))]
    NotARepository { path: PathBuf },

    #[error("{action} at '{}': {output}", canonicalize(.root))]
    GitFailed {
        action: String,
        root: PathBuf,
        output: String,
    },

    #[error("pager command '{cmdline}' did not run successfully")]
    PagerFailed {
        cmdline: String,
        #[source]
        source: io::Error,
    },

    #[error("unknown config name '{0}'")]
    UnknownConfigName(String),

    #[error("cannot locate home directory. Please set $NOTES_CLI_HOME")]
    HomeNotFound,

    #[error("could not create home '{}'", canonicalize(.path))]
    CannotCreateHome {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias using Error
pub type Result<T> = std::result::Result<T, Error>;
