use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;

use bookcheck_core::{BookResult, IdentifiedBook, LibraryResult};

const RULE_WIDTH: usize = 60;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn banner(label: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{rule}\n  {label}\n{rule}\n")
}

pub fn format_books(books: &[IdentifiedBook]) -> String {
    let mut out = banner(&format!("Identified {} book(s)", books.len()));

    for (i, book) in books.iter().enumerate() {
        let _ = writeln!(out, "\n--- Book {} ---", i + 1);
        out.push_str(&format_identified(book));
    }

    out
}

fn format_identified(book: &IdentifiedBook) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Title:      {}", book.title);
    let _ = writeln!(
        out,
        "  Author:     {}",
        book.author.as_deref().unwrap_or("(unknown)")
    );
    let _ = writeln!(
        out,
        "  Series:     {}",
        book.series.as_deref().unwrap_or("(none)")
    );
    if let Some(isbn) = &book.isbn {
        let _ = writeln!(out, "  ISBN:       {isbn}");
    }
    let _ = writeln!(out, "  Confidence: {:.0}%", book.confidence * 100.0);
    if let Some(notes) = &book.notes {
        let _ = writeln!(out, "  Notes:      {notes}");
    }
    out
}

pub fn format_library_results(label: &str, results: &[LibraryResult]) -> String {
    let mut out = banner(label);

    if results.is_empty() {
        out.push_str("  (no results)\n");
        return out;
    }

    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(out, "\n--- Result {} ---", i + 1);
        out.push_str(&format_library(result));
    }

    out
}

fn format_library(result: &LibraryResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Title:  {}", result.title.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "  Author: {}", result.author.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "  ISBN:   {}", result.isbn.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "  Found:  {}", result.found);

    for avail in &result.availabilities {
        let _ = write!(out, "    [{}] {}", avail.status, avail.location);
        if let Some(call_number) = &avail.call_number {
            let _ = write!(out, " -- {call_number}");
        }
        if let Some(due) = avail.due_date {
            let _ = write!(out, " (due {due})");
        }
        out.push('\n');
    }

    out
}

pub fn format_book_results(results: &[BookResult]) -> String {
    let found = results.iter().filter(|r| r.library.found).count();
    let mut out = banner(&format!(
        "Checked {} book(s), {} in the catalogue",
        results.len(),
        found
    ));

    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(out, "\n--- Book {} ---", i + 1);
        out.push_str(&format_identified(&result.identified));
        if result.library.found {
            out.push_str("  Library:\n");
            out.push_str(&format_library(&result.library));
        } else {
            out.push_str("  Library:    (not in catalogue)\n");
        }
    }

    out
}
