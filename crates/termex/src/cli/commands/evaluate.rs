//! Implementation of `termex evaluate`.

use std::process::ExitCode;

use termex_extract::{CandidateTable, EvaluationOptions, evaluate};

use crate::cli::{
    args::EvaluateCommand,
    context::{CommandContext, read_list},
    output::{print_evaluation, print_json},
    store::CANDIDATES,
};

/// Evaluates the top stored candidates against gold terms.
pub fn run(ctx: &CommandContext, cmd: &EvaluateCommand) -> ExitCode {
    let mut gold = match read_list(&cmd.terms) {
        Ok(terms) => terms,
        Err(code) => return code,
    };
    if let Some(path) = &cmd.seeds {
        match read_list(path) {
            Ok(seeds) => gold.extend(seeds),
            Err(code) => return code,
        }
    }

    let table: CandidateTable = match ctx.load_table(CANDIDATES) {
        Ok(table) => table,
        Err(code) => return code,
    };

    let settings = &ctx.config.evaluation;
    let options = EvaluationOptions {
        limit: cmd.limit,
        order: cmd.order,
        iterations: cmd.iterations.unwrap_or(settings.iterations),
        ignore_case: settings.ignore_case && !cmd.case_sensitive,
        n_max: cmd.n_max,
    };
    let evaluation = evaluate(&table, &gold, &options);

    if cmd.json {
        return print_json(&evaluation);
    }
    print_evaluation(&evaluation);
    ExitCode::SUCCESS
}
