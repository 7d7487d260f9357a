//! Implementation of `termex learn-patterns`.

use std::{fs, process::ExitCode};

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use termex_extract::{TaggedNgramTable, learn_patterns};

use super::shared::plural;
use crate::cli::{
    args::{DEFAULT_REPRESENTATIVITY, LearnPatternsCommand},
    context::{CommandContext, read_list},
    output::{dim, print_json},
    store::TAGGED_NGRAMS,
};

/// Learns linguistic patterns from gold terms and the stored tagged n-grams.
pub fn run(ctx: &CommandContext, cmd: &LearnPatternsCommand) -> ExitCode {
    let terms = match read_list(&cmd.terms) {
        Ok(terms) => terms,
        Err(code) => return code,
    };
    let tagged: TaggedNgramTable = match ctx.load_table(TAGGED_NGRAMS) {
        Ok(tagged) => tagged,
        Err(code) => return code,
    };
    let representativity = cmd.representativity.unwrap_or(DEFAULT_REPRESENTATIVITY);

    let patterns = learn_patterns(&tagged, &terms, representativity);

    if let Some(path) = &cmd.output {
        let mut contents: String = patterns
            .iter()
            .map(|p| p.pattern.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        if let Err(e) = fs::write(path, contents) {
            eprintln!("error: failed to write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        eprintln!(
            "Wrote {} to {}",
            plural(patterns.len(), "pattern"),
            path.display()
        );
    }

    if cmd.json {
        return print_json(&patterns);
    }

    if patterns.is_empty() {
        println!("{}", dim("No patterns learned."));
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Weight", "Pattern"]);
    for pattern in &patterns {
        table.add_row(vec![
            Cell::new(pattern.weight).set_alignment(CellAlignment::Right),
            Cell::new(&pattern.pattern),
        ]);
    }
    println!("{table}");
    ExitCode::SUCCESS
}
