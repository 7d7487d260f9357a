//! Implementation of `termex unigrams`.

use std::process::ExitCode;

use termex_extract::{CandidateTable, RankOptions, rank_candidates, select_unigrams};

use crate::cli::{
    args::{DEFAULT_LIST_LIMIT, UnigramsCommand},
    context::CommandContext,
    output::print_candidates,
    store::CANDIDATES,
};

/// Lists unigrams aggregated from the stored candidates by token position.
pub fn run(ctx: &CommandContext, cmd: &UnigramsCommand) -> ExitCode {
    let table: CandidateTable = match ctx.load_table(CANDIDATES) {
        Ok(table) => table,
        Err(code) => return code,
    };

    let unigrams = select_unigrams(&table, cmd.position);
    let options = RankOptions {
        limit: Some(cmd.limit.unwrap_or(DEFAULT_LIST_LIMIT)),
        ..RankOptions::default()
    };
    print_candidates(&rank_candidates(&unigrams, &options, 0), cmd.json)
}
