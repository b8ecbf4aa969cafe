//! List tags command module

use std::collections::HashSet;
use std::io::Write;

use notes_cli::{walk_notes, Config, Result};

/// Print each distinct tag once, in the order notes are discovered
pub fn run(config: &Config, category: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let root = category
        .filter(|c| !c.is_empty())
        .map(|c| c.split('/').fold(config.home_path.clone(), |dir, part| dir.join(part)))
        .unwrap_or_else(|| config.home_path.clone());

    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    walk_notes(&root, config, |_, note| {
        for tag in &note.tags {
            if seen.insert(tag.clone()) {
                tags.push(tag.clone());
            }
        }
        Ok(())
    })?;

    for tag in tags {
        writeln!(out, "{}", tag)?;
    }
    Ok(())
}
