//! Implementation of `termex extract`.

use std::process::ExitCode;

use termex_extract::{
    Corpus, NgramCounts, StopwordSets, extract_from_segment, statistical_extraction,
};

use super::shared::plural;
use crate::cli::{
    args::{ExtractCommand, OrderArgs},
    context::CommandContext,
    output::dim,
    store::{CANDIDATES, CORPUS, NGRAMS},
};

/// Extracts candidates from the stored n-grams, or terms of one segment.
pub fn run(ctx: &CommandContext, cmd: &ExtractCommand) -> ExitCode {
    let stopwords = match ctx.stopword_sets() {
        Ok(stopwords) => stopwords,
        Err(code) => return code,
    };

    if let Some(id) = cmd.segment {
        return extract_segment(ctx, cmd, &stopwords, id);
    }

    let counts: NgramCounts = match ctx.load_table(NGRAMS) {
        Ok(counts) => counts,
        Err(code) => return code,
    };
    let min_frequency = cmd
        .min_frequency
        .unwrap_or(ctx.config.ngrams.min_frequency);

    let table = statistical_extraction(&counts.ngrams, &stopwords, min_frequency);
    if let Err(code) = ctx.save_table(CANDIDATES, &table) {
        return code;
    }

    println!(
        "Extracted {} from {}",
        plural(table.len(), "candidate"),
        plural(counts.ngrams.len(), "n-gram")
    );
    ExitCode::SUCCESS
}

/// Prints the terms of a single stored segment with their local frequencies.
///
/// Every local n-gram counts unless `--min-frequency` is given.
fn extract_segment(
    ctx: &CommandContext,
    cmd: &ExtractCommand,
    stopwords: &StopwordSets,
    id: u64,
) -> ExitCode {
    let corpus: Corpus = match ctx.load_table(CORPUS) {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };
    let Some(segment) = corpus.iter().find(|s| s.id == id) else {
        eprintln!("error: no segment with id {id}");
        return ExitCode::FAILURE;
    };

    let mut settings = ctx.ngram_settings(&OrderArgs::default());
    settings.min_frequency = cmd.min_frequency.unwrap_or(1);

    let terms = extract_from_segment(segment, ctx.tokenizer(), stopwords, &settings);
    if terms.is_empty() {
        println!("{}", dim("No terms."));
    }
    for (text, frequency) in &terms {
        println!("{frequency}\t{text}");
    }
    ExitCode::SUCCESS
}
