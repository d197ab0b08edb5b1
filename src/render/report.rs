//! Plain-text extraction report.

use std::fmt::Write;

use crate::model::Document;

/// Characters of section content shown per section.
const SECTION_PREVIEW_CHARS: usize = 200;

/// Characters of footnote text shown per footnote.
const FOOTNOTE_PREVIEW_CHARS: usize = 100;

/// Summarize a document: counts, then one entry per section, table,
/// footnote and TOC line.
pub fn to_report(doc: &Document) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write_report(&mut out, doc);
    out
}

fn write_report(out: &mut String, doc: &Document) -> std::fmt::Result {
    writeln!(out, "Title: {}", doc.title)?;
    writeln!(out)?;
    writeln!(out, "Number of sections: {}", doc.sections.len())?;
    writeln!(out, "Number of tables: {}", doc.tables.len())?;
    writeln!(out, "Number of footnotes: {}", doc.footnotes.len())?;
    writeln!(out, "Number of TOC items: {}", doc.toc.len())?;
    writeln!(out, "Total pages: {}", doc.pages.len())?;
    writeln!(out)?;

    writeln!(out, "=== Sections ===")?;
    for section in &doc.sections {
        writeln!(out, "{} (Level {})", section.title, section.level)?;
        writeln!(out, "{}...", preview(&section.body, SECTION_PREVIEW_CHARS))?;
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "=== Tables ===")?;
    for table in &doc.tables {
        writeln!(
            out,
            "Page {} - Table {} with {} rows",
            table.page,
            table.table_index,
            table.row_count()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "=== Footnotes ===")?;
    for note in &doc.footnotes {
        writeln!(
            out,
            "{}: {}...",
            note.number,
            preview(&note.text, FOOTNOTE_PREVIEW_CHARS)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "=== TOC ===")?;
    for entry in &doc.toc {
        writeln!(out, "{} {} (Page {})", entry.number, entry.title, entry.page)?;
    }

    Ok(())
}

/// First `max` characters of `text`.
fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
