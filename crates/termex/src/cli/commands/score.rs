//! Implementation of `termex score`.

use std::process::ExitCode;

use termex_config::MAX_ASSOCIATION_ORDER;
use termex_extract::{
    AssociationMeasure, CandidateTable, CooccurrenceCounts, Corpus, score_candidates,
};

use super::shared::parse_setting;
use crate::cli::{
    args::ScoreCommand,
    context::CommandContext,
    store::{CANDIDATES, CORPUS},
};

/// Rescores the stored candidates with an association measure.
pub fn run(ctx: &CommandContext, cmd: &ScoreCommand) -> ExitCode {
    let measure: AssociationMeasure = match cmd.measure {
        Some(measure) => measure,
        None => match parse_setting(&ctx.config.association.measure) {
            Ok(measure) => measure,
            Err(code) => return code,
        },
    };
    let orders = scored_orders(&cmd.orders, ctx.config.ngrams.n_max);
    if orders.is_empty() {
        eprintln!("error: no candidate orders to score");
        return ExitCode::FAILURE;
    }

    let table: CandidateTable = match ctx.load_table(CANDIDATES) {
        Ok(table) => table,
        Err(code) => return code,
    };
    let corpus: Corpus = match ctx.load_table(CORPUS) {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    let max_order = orders.iter().copied().max().unwrap_or(2);
    let counts = CooccurrenceCounts::from_corpus(&corpus, ctx.tokenizer(), max_order);
    let report = score_candidates(&table, &counts, measure, &orders);
    if let Err(code) = ctx.save_table(CANDIDATES, &report.table) {
        return code;
    }

    let scored = report
        .table
        .iter()
        .filter(|c| c.measure.as_deref() == Some(measure.name()))
        .count();
    println!("Scored {scored} candidates with {measure}");
    if !report.skipped_orders.is_empty() {
        let skipped: Vec<String> = report
            .skipped_orders
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("Skipped orders: {}", skipped.join(", "));
    }
    ExitCode::SUCCESS
}

/// Orders to score: the requested ones, or 2 up to `n_max` capped at the
/// largest order association measures support.
fn scored_orders(requested: &[usize], n_max: usize) -> Vec<usize> {
    if !requested.is_empty() {
        let mut orders = requested.to_vec();
        orders.sort_unstable();
        orders.dedup();
        return orders;
    }
    (2..=n_max.min(MAX_ASSOCIATION_ORDER)).collect()
}
