use clap::{Parser, Subcommand};

use crate::sort::SortBy;

/// notes - Simple note taking tool for command line with your favorite editor
///
/// # Quick Reference
///
/// ## Creating Notes
///
/// ```bash
/// notes new blog how-to-use-notes        # Create blog/how-to-use-notes.md
/// notes new blog/rust lifetimes rust,tips # Nested category with tags
/// notes new memo todo --no-inline-input   # Never read body from stdin
/// ```
///
/// ## Listing Notes
///
/// ```bash
/// notes list                          # Full paths, most recently created first
/// notes ls -r                         # Paths relative to home
/// notes ls -o                         # One line per note: path, tags, title
/// notes ls -f                         # Metadata, title and first lines of body
/// notes ls -c '^blog' -t rust         # Filter categories and tags by regex
/// notes ls -s modified                # Sort by modified time
/// notes ls -e                         # Open listed notes in the editor
/// notes ls -j                         # JSON array for scripting
/// ```
///
/// ## Other Commands
///
/// ```bash
/// notes categories                    # All categories
/// notes tags blog                     # Tags used under blog/
/// notes save -m "weekly notes"        # git add, commit and push
/// notes config home                   # Print notes home
/// ```
///
/// ## Environment Variables
///
/// - `NOTES_CLI_HOME`: Notes home (default: $XDG_DATA_HOME/notes-cli)
/// - `NOTES_CLI_EDITOR`, `EDITOR`: Editor command line
/// - `NOTES_CLI_GIT`: Git executable (default: git)
/// - `NOTES_CLI_PAGER`, `PAGER`: Pager command line (default: less -R -F -X)
/// - `NOTES_CLI_LOG`: Log filter such as `debug` (default: warn)
#[derive(Parser, Debug)]
#[command(name = "notes")]
#[command(version)]
#[command(about = "Simple note taking tool for command line with your favorite editor")]
pub struct Cli {
    /// Home directory of notes (default: $NOTES_CLI_HOME or $XDG_DATA_HOME/notes-cli)
    #[arg(long, global = true, value_name = "PATH")]
    pub home: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New {
        /// Category of the note. Nested categories are separated by '/'
        category: String,

        /// File name of the note. '.md' is added when missing
        filename: String,

        /// Comma-separated tags of the note
        #[arg(default_value = "")]
        tags: String,

        /// Do not request inline input even if no editor is set
        #[arg(long)]
        no_inline_input: bool,
    },

    /// List notes with filtering by categories and/or tags with regular expressions
    #[command(alias = "ls")]
    List(ListArgs),

    /// List all categories
    #[command(alias = "cats")]
    Categories,

    /// List all tags
    Tags {
        /// Show tags of specified category. If not specified, all tags are output
        category: Option<String>,
    },

    /// Save notes using Git: add all notes, commit and push to 'origin'
    Save {
        /// Commit message. If omitted, an automatic message is used
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Output config values. By default output all values with KEY=VALUE style
    Config {
        /// One of 'home', 'git', 'editor', 'pager'. Only the value is output
        name: Option<String>,
    },
}

/// Options of `notes list`
#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    /// Show full information of notes (path, metadata, title, first lines of body)
    #[arg(short, long)]
    pub full: bool,

    /// Filter list by category name with regular expression
    #[arg(short, long, value_name = "REGEX")]
    pub category: Option<String>,

    /// Filter list by tag name with regular expression
    #[arg(short, long, value_name = "REGEX")]
    pub tag: Option<String>,

    /// Show paths relative to home
    #[arg(short, long)]
    pub relative: bool,

    /// Show one line per note: relative path, tags and title
    #[arg(short, long)]
    pub oneline: bool,

    /// Sort list by the given key
    #[arg(short, long, value_enum, default_value_t = SortBy::Created)]
    pub sort: SortBy,

    /// Open listed notes with the editor
    #[arg(short, long)]
    pub edit: bool,

    /// Output notes as JSON
    #[arg(short, long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_new() {
        let cli = Cli::try_parse_from(["notes", "new", "blog/rust", "memo", "a,b"]).unwrap();
        match cli.command {
            Command::New { category, filename, tags, no_inline_input } => {
                assert_eq!(category, "blog/rust");
                assert_eq!(filename, "memo");
                assert_eq!(tags, "a,b");
                assert!(!no_inline_input);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_alias_and_sort() {
        let cli = Cli::try_parse_from(["notes", "--home", "/tmp/n", "ls", "-s", "modified", "-r", "-t", "rust"]).unwrap();
        assert_eq!(cli.home.as_deref(), Some("/tmp/n"));
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.sort, SortBy::Modified);
                assert!(args.relative);
                assert_eq!(args.tag.as_deref(), Some("rust"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["notes", "list", "--sort", "size"]).is_err());
    }

    #[test]
    fn test_parse_cats_alias() {
        let cli = Cli::try_parse_from(["notes", "cats"]).unwrap();
        assert!(matches!(cli.command, Command::Categories));
    }
}
