//! Implementation of `termex list`.

use std::{collections::HashSet, process::ExitCode};

use termex_extract::{CandidateTable, RankOptions, rank_candidates};

use crate::cli::{
    args::{DEFAULT_LIST_LIMIT, ListCommand},
    context::{CommandContext, read_list},
    output::print_candidates,
    store::CANDIDATES,
};

/// Lists the stored candidates, best first.
pub fn run(ctx: &CommandContext, cmd: &ListCommand) -> ExitCode {
    let known_terms: HashSet<String> = match &cmd.terms {
        Some(path) => match read_list(path) {
            Ok(terms) => terms.into_iter().collect(),
            Err(code) => return code,
        },
        None => HashSet::new(),
    };
    let table: CandidateTable = match ctx.load_table(CANDIDATES) {
        Ok(table) => table,
        Err(code) => return code,
    };

    let options = RankOptions {
        order: cmd.order,
        n_min: cmd.orders.n_min,
        n_max: cmd.orders.n_max,
        exclude: HashSet::new(),
        known_terms,
        limit: Some(cmd.limit.unwrap_or(DEFAULT_LIST_LIMIT)),
    };
    let ranked = rank_candidates(&table, &options, 0);
    print_candidates(&ranked, cmd.json)
}
