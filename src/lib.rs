//! Core of the notes command.
//!
//! Notes are markdown files under category directories in a home directory.
//! Each note carries its category, tags and creation time as a metadata list
//! right after its title.
//!
//! 1. Resolve a [`Config`] with [`Config::from_env`]
//! 2. Collect categories with [`collect_categories`]
//! 3. Load notes with [`Categories::notes`] or [`Note::load`] and order them
//!    with the functions in [`sort`]

pub mod category;
pub mod cli;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod git;
pub mod note;
pub mod pager;
pub mod sort;
pub mod util;

pub use category::{collect_categories, walk_notes, Categories, Category, CollectMode};
pub use cli::{Cli, Command, ListArgs};
pub use config::Config;
pub use error::{Error, Result};
pub use note::Note;
pub use sort::{sort_by_category, sort_by_created, sort_by_filename, sort_by_modified, sort_notes, SortBy};
