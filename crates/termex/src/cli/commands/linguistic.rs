//! Implementation of `termex linguistic`.

use std::process::ExitCode;

use termex_extract::{TaggedNgramTable, linguistic_extraction};
use termex_pattern::PatternSet;

use super::shared::plural;
use crate::cli::{
    args::LinguisticCommand,
    context::{CommandContext, read_list},
    store::{CANDIDATES, TAGGED_NGRAMS},
};

/// Extracts candidates from the stored tagged n-grams with a pattern file.
pub fn run(ctx: &CommandContext, cmd: &LinguisticCommand) -> ExitCode {
    let lines = match read_list(&cmd.patterns) {
        Ok(lines) => lines,
        Err(code) => return code,
    };
    let patterns = match PatternSet::from_lines(&lines) {
        Ok(patterns) => patterns,
        Err(e) => {
            eprintln!("error: {}: {e}", cmd.patterns.display());
            return ExitCode::FAILURE;
        }
    };
    if patterns.is_empty() {
        eprintln!("error: no patterns in {}", cmd.patterns.display());
        return ExitCode::FAILURE;
    }

    let stopwords = match ctx.stopword_sets() {
        Ok(sets) => sets.boundary,
        Err(code) => return code,
    };
    let tagged: TaggedNgramTable = match ctx.load_table(TAGGED_NGRAMS) {
        Ok(tagged) => tagged,
        Err(code) => return code,
    };
    let min_frequency = cmd
        .min_frequency
        .unwrap_or(ctx.config.ngrams.min_frequency);

    let table = linguistic_extraction(&tagged, &patterns, &stopwords, min_frequency);
    if let Err(code) = ctx.save_table(CANDIDATES, &table) {
        return code;
    }

    println!(
        "Extracted {} with {}",
        plural(table.len(), "candidate"),
        plural(patterns.len(), "pattern")
    );
    ExitCode::SUCCESS
}
