//! List categories command module

use std::io::Write;

use notes_cli::{collect_categories, CollectMode, Config, Result};

pub fn run(config: &Config, out: &mut dyn Write) -> Result<()> {
    let cats = collect_categories(config, CollectMode::All)?;
    let mut names = cats.names();
    names.sort();

    for name in names {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}
