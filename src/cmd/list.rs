//! List notes command module
//!
//! Collects notes, filters them by category and tag regular expressions,
//! sorts them and prints them in one of several formats.

use std::io::{BufWriter, Write};

use chrono::SecondsFormat;
use notes_cli::constants as C;
use notes_cli::editor::open_editor;
use notes_cli::pager::Pager;
use notes_cli::{collect_categories, sort_notes, CollectMode, Config, Error, ListArgs, Note, Result};
use regex::Regex;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// A note with its absolute path, for JSON output
#[derive(Serialize)]
struct NoteRecord<'a> {
    path: String,
    #[serde(flatten)]
    note: &'a Note,
}

pub fn run(config: &Config, args: &ListArgs, out: &mut dyn Write) -> Result<()> {
    let notes = collect_notes(config, args)?;
    if notes.is_empty() {
        return Ok(());
    }

    if args.edit {
        let paths: Vec<_> = notes.iter().map(Note::file_path).collect();
        return open_editor(config, &paths);
    }

    let pager_cmd = config.pager_cmd.as_deref().filter(|_| !args.json);
    let Some(pager_cmd) = pager_cmd else {
        return print_notes(args, &notes, out);
    };

    let mut pager = Pager::start(pager_cmd)?;
    let printed = print_notes(args, &notes, &mut pager);
    let waited = pager.wait();
    printed?;
    waited
}

fn compile_filter(pattern: Option<&str>, what: &'static str) -> Result<Option<Regex>> {
    pattern
        .filter(|p| !p.is_empty())
        .map(|p| Regex::new(p).map_err(|source| Error::InvalidRegex { what, source }))
        .transpose()
}

/// Load notes matching the filters, sorted as requested
fn collect_notes(config: &Config, args: &ListArgs) -> Result<Vec<Note>> {
    let mut cats = collect_categories(config, CollectMode::All)?;

    if let Some(re) = compile_filter(args.category.as_deref(), "categories")? {
        cats.retain(|name, _| re.is_match(name));
    }
    let tag_re = compile_filter(args.tag.as_deref(), "tags")?;

    let mut notes = cats.notes(config)?;
    if let Some(re) = tag_re {
        // Notes with no matching tag are ignored
        notes.retain(|note| note.tags.iter().any(|t| re.is_match(t)));
    }

    sort_notes(&mut notes, args.sort)?;
    Ok(notes)
}

fn print_notes(args: &ListArgs, notes: &[Note], out: &mut dyn Write) -> Result<()> {
    let mut out = BufWriter::new(out);

    if args.json {
        let records: Vec<NoteRecord> = notes
            .iter()
            .map(|note| NoteRecord {
                path: note.file_path().display().to_string(),
                note,
            })
            .collect();
        serde_json::to_writer_pretty(&mut out, &records).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else if args.full {
        for note in notes {
            print_note_full(&mut out, note)?;
        }
    } else if args.oneline {
        print_oneline(&mut out, notes)?;
    } else if args.relative {
        for note in notes {
            writeln!(out, "{}", note.rel_file_path().display())?;
        }
    } else {
        for note in notes {
            writeln!(out, "{}", note.file_path().display())?;
        }
    }

    out.flush()?;
    Ok(())
}

fn print_note_full(out: &mut impl Write, note: &Note) -> Result<()> {
    writeln!(out, "{}", note.file_path().display())?;
    writeln!(out, "Category: {}", note.category)?;
    writeln!(out, "Tags:     {}", note.tags.join(C::TAGS_SEPARATOR))?;
    writeln!(out, "Created:  {}", note.created.to_rfc3339_opts(SecondsFormat::Secs, true))?;
    if !note.title.is_empty() {
        let underline = C::TITLE_UNDERLINE.to_string().repeat(note.title.width());
        write!(out, "\n{}\n{}\n\n", note.title, underline)?;
    }

    // An unreadable body only hides the preview
    if let Ok((body, lines)) = note.read_body_lines(C::FULL_BODY_LINES) {
        if !body.is_empty() {
            out.write_all(body.as_bytes())?;
            if !body.ends_with('\n') {
                writeln!(out)?;
            }
            if lines == C::FULL_BODY_LINES {
                writeln!(out, "{}", C::ELLIPSIS)?;
            }
        }
    }

    // Separate each note with blank line
    writeln!(out)?;
    Ok(())
}

fn print_oneline(out: &mut impl Write, notes: &[Note]) -> Result<()> {
    let rows: Vec<(String, String)> = notes
        .iter()
        .map(|note| (note.rel_file_path().display().to_string(), note.tags.join(",")))
        .collect();
    let path_width = rows.iter().map(|(p, _)| p.width()).max().unwrap_or(0);
    let tags_width = rows.iter().map(|(_, t)| t.width()).max().unwrap_or(0);

    for ((path, tags), note) in rows.iter().zip(notes) {
        writeln!(
            out,
            "{}{} {}{} {}",
            path,
            " ".repeat(path_width - path.width()),
            tags,
            " ".repeat(tags_width - tags.width()),
            note.title
        )?;
    }
    Ok(())
}
