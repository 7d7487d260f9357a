//! Implementation of `termex tsr`.

use std::process::ExitCode;

use serde::Serialize;
use termex_extract::{CandidateTable, LexiconSizes, Lexicons, TsrPolicy, tsr};

use super::shared::{parse_setting, plural};
use crate::cli::{
    args::TsrCommand,
    context::{CommandContext, read_list},
    output::{dim, print_json},
    store::CANDIDATES,
};

/// JSON output for `termex tsr --json`.
#[derive(Serialize)]
struct JsonTsrOutput<'a> {
    /// Policy used.
    policy: String,
    /// Iterations run.
    iterations: u64,
    /// Admitted candidates.
    admitted: usize,
    /// Final lexicons.
    lexicons: &'a Lexicons,
    /// Lexicon sizes after each iteration.
    sizes: &'a [LexiconSizes],
}

/// Runs termhood propagation from seed terms over the stored candidates.
pub fn run(ctx: &CommandContext, cmd: &TsrCommand) -> ExitCode {
    let policy: TsrPolicy = match cmd.policy {
        Some(policy) => policy,
        None => match parse_setting(&ctx.config.tsr.policy) {
            Ok(policy) => policy,
            Err(code) => return code,
        },
    };
    let max_iterations = cmd.max_iterations.unwrap_or(ctx.config.tsr.max_iterations);

    let seeds = match read_list(&cmd.seeds) {
        Ok(seeds) => seeds,
        Err(code) => return code,
    };
    if seeds.is_empty() {
        eprintln!("error: no seed terms in {}", cmd.seeds.display());
        return ExitCode::FAILURE;
    }

    let table: CandidateTable = match ctx.load_table(CANDIDATES) {
        Ok(table) => table,
        Err(code) => return code,
    };

    let outcome = tsr(&table, &seeds, policy, max_iterations);
    if let Err(code) = ctx.save_table(CANDIDATES, &outcome.table) {
        return code;
    }

    if cmd.json {
        return print_json(&JsonTsrOutput {
            policy: policy.to_string(),
            iterations: outcome.iterations,
            admitted: outcome.table.len(),
            lexicons: &outcome.lexicons,
            sizes: &outcome.sizes,
        });
    }

    println!(
        "TSR ({policy}): admitted {} of {} in {}",
        plural(outcome.table.len(), "candidate"),
        table.len(),
        plural(outcome.iterations as usize, "iteration")
    );
    for (i, sizes) in outcome.sizes.iter().enumerate() {
        println!(
            "   {} first {}, middle {}, last {}, component {}",
            dim(&format!("iteration {}:", i + 1)),
            sizes.first,
            sizes.middle,
            sizes.last,
            sizes.component
        );
    }
    ExitCode::SUCCESS
}
