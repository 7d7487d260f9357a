//! Implementation of `termex compound`.

use std::process::ExitCode;

use termex_extract::{Corpus, compoundify};

use super::shared::plural;
use crate::cli::{
    args::CompoundCommand,
    context::{CommandContext, read_list},
    store::CORPUS,
};

/// Joins multi-word terms in the stored corpus into single tokens.
pub fn run(ctx: &CommandContext, cmd: &CompoundCommand) -> ExitCode {
    let terms = match read_list(&cmd.terms) {
        Ok(terms) => terms,
        Err(code) => return code,
    };
    let corpus: Corpus = match ctx.load_table(CORPUS) {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    let compounded = compoundify(&corpus, &terms);
    let changed = corpus
        .iter()
        .zip(compounded.iter())
        .filter(|(before, after)| before.text != after.text)
        .count();

    if let Err(code) = ctx.save_table(CORPUS, &compounded) {
        return code;
    }
    println!(
        "Rewrote {} of {}",
        plural(changed, "segment"),
        compounded.len()
    );
    ExitCode::SUCCESS
}
