//! Implementation of `termex normalize`.

use std::process::ExitCode;

use termex_extract::{CandidateTable, case_normalization, nest_normalization};

use super::shared::plural;
use crate::cli::{args::NormalizeCommand, context::CommandContext, store::CANDIDATES};

/// Merges case variants and prunes nested candidates.
///
/// Runs both steps, case first, unless one is selected.
pub fn run(ctx: &CommandContext, cmd: &NormalizeCommand) -> ExitCode {
    let (case, nested) = if cmd.case || cmd.nested {
        (cmd.case, cmd.nested)
    } else {
        (true, true)
    };

    let mut table: CandidateTable = match ctx.load_table(CANDIDATES) {
        Ok(table) => table,
        Err(code) => return code,
    };
    let before = table.len();

    if case {
        table = case_normalization(&table);
        println!("Case normalization: {} left", plural(table.len(), "candidate"));
    }
    if nested {
        let percent = cmd.percent.unwrap_or(ctx.config.normalize.nest_percent);
        table = nest_normalization(&table, percent, ctx.config.ngrams.n_max);
        println!(
            "Nested normalization ({percent}%): {} left",
            plural(table.len(), "candidate")
        );
    }

    if let Err(code) = ctx.save_table(CANDIDATES, &table) {
        return code;
    }
    println!("Removed {}", plural(before - table.len(), "candidate"));
    ExitCode::SUCCESS
}
