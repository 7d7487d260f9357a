//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use termex_extract::{Evaluation, RankedCandidate, TermCandidate};

/// ANSI color codes for terminal output.
mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all attributes.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats text as a header (bold cyan).
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// JSON row for a listed candidate.
#[derive(Serialize)]
struct JsonCandidate<'a> {
    /// 1-based rank.
    rank: usize,
    /// Candidate text.
    text: &'a str,
    /// Number of tokens.
    n: usize,
    /// Corpus frequency.
    frequency: u64,
    /// Measure that produced the value.
    measure: Option<&'a str>,
    /// Score.
    value: Option<f64>,
    /// True if the candidate is in the marked term list.
    known: bool,
}

/// Prints ranked candidates as a table or JSON.
pub fn print_candidates(ranked: &[RankedCandidate], json: bool) -> ExitCode {
    if json {
        let rows: Vec<JsonCandidate<'_>> = ranked
            .iter()
            .map(|r| JsonCandidate {
                rank: r.rank,
                text: &r.candidate.text,
                n: r.candidate.n,
                frequency: r.candidate.frequency,
                measure: r.candidate.measure.as_deref(),
                value: r.candidate.value,
                known: r.known,
            })
            .collect();
        return print_json(&rows);
    }

    if ranked.is_empty() {
        println!("{}", dim("No candidates."));
        return ExitCode::SUCCESS;
    }

    println!("{}", candidate_table(ranked));
    ExitCode::SUCCESS
}

/// Builds the text table for ranked candidates.
fn candidate_table(ranked: &[RankedCandidate]) -> Table {
    let marked = ranked.iter().any(|r| r.known);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec!["#", "Frequency", "Measure", "Value", "n", "Term"];
    if marked {
        header.push("Known");
    }
    table.set_header(header);

    for r in ranked {
        let c = &r.candidate;
        let mut row = vec![
            Cell::new(r.rank).set_alignment(CellAlignment::Right),
            Cell::new(c.frequency).set_alignment(CellAlignment::Right),
            Cell::new(c.measure.as_deref().unwrap_or("-")),
            Cell::new(format_value(c)).set_alignment(CellAlignment::Right),
            Cell::new(c.n).set_alignment(CellAlignment::Right),
            Cell::new(&c.text),
        ];
        if marked {
            row.push(Cell::new(if r.known { "*" } else { "" }));
        }
        table.add_row(row);
    }
    table
}

/// Formats a candidate's value for display.
fn format_value(candidate: &TermCandidate) -> String {
    match candidate.value {
        Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => format!("{value:.0}"),
        Some(value) => format!("{value:.4}"),
        None => "-".to_string(),
    }
}

/// Prints evaluation figures as a short report.
pub fn print_evaluation(evaluation: &Evaluation) {
    println!("{}", subheader(&format!("Top {} candidates:", evaluation.limit)));
    println!(
        "   {} {:.2} of {:.2}",
        dim("correct:  "),
        evaluation.correct,
        evaluation.total
    );
    println!("   {} {:.2}%", dim("precision:"), evaluation.precision);
    println!("   {} {:.2}%", dim("recall:   "), evaluation.recall);
    println!("   {} {:.2}", dim("f1:       "), evaluation.f1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(text: &str, value: Option<f64>, known: bool) -> RankedCandidate {
        let mut candidate = TermCandidate::with_frequency(text, 3);
        candidate.value = value;
        RankedCandidate {
            rank: 1,
            candidate,
            known,
        }
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(&ranked("a b", Some(99.0), false).candidate), "99");
        assert_eq!(format_value(&ranked("a b", Some(1.23456), false).candidate), "1.2346");
        assert_eq!(format_value(&ranked("a b", None, false).candidate), "-");
    }

    #[test]
    fn known_column_only_when_marked() {
        let plain = candidate_table(&[ranked("data lake", Some(2.0), false)]).to_string();
        assert!(!plain.contains("Known"));
        assert!(plain.contains("data lake"));

        let marked = candidate_table(&[ranked("data lake", Some(2.0), true)]).to_string();
        assert!(marked.contains("Known"));
    }
}
