//! Constants for notes-cli
//!
//! File names, metadata markers and environment variable names shared by the
//! note model, the category collector and the commands.

// === File and Directory Names ===

/// File extension every note carries
pub const NOTE_EXTENSION: &str = ".md";

/// Template file looked up from a category directory up to home
pub const TEMPLATE_FILENAME: &str = ".template.md";

/// Directory name used for notes home under the platform data directory
pub const HOME_DIRNAME: &str = "notes-cli";

// === Note Format ===

/// Metadata line prefix for category
pub const CATEGORY_PREFIX: &str = "- Category: ";

/// Metadata line prefix for tags (a space after the colon is optional)
pub const TAGS_PREFIX: &str = "- Tags:";

/// Metadata line prefix for creation time
pub const CREATED_PREFIX: &str = "- Created: ";

/// Separator used when writing tags
pub const TAGS_SEPARATOR: &str = ", ";

/// Character used for the title underline
pub const TITLE_UNDERLINE: char = '=';

/// Title used when a note starts with an underline
pub const NO_TITLE: &str = "(no title)";

/// Opens the comment which hides metadata when rendered
pub const OPENING_COMMENT: &str = "<!--";

/// Closes the comment which hides metadata when rendered
pub const CLOSING_COMMENT: &str = "-->";

// === Listing ===

/// Body lines shown per note by `list --full`
pub const FULL_BODY_LINES: usize = 10;

/// Marker printed after a truncated body
pub const ELLIPSIS: &str = "...";

// === Environment Variables ===

pub const ENV_HOME: &str = "NOTES_CLI_HOME";
pub const ENV_GIT: &str = "NOTES_CLI_GIT";
pub const ENV_EDITOR: &str = "NOTES_CLI_EDITOR";
pub const ENV_PAGER: &str = "NOTES_CLI_PAGER";
pub const ENV_LOG: &str = "NOTES_CLI_LOG";

/// Default pager used when `less` is installed
pub const DEFAULT_PAGER: &str = "less -R -F -X";

// === Process ===

/// Exit status on any error
pub const ERROR_EXIT_CODE: i32 = 110;
