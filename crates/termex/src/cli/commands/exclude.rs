//! Implementation of `termex exclude`.

use std::{collections::HashSet, path::PathBuf, process::ExitCode};

use termex_extract::{CandidateTable, ExclusionRegex, exclude_terms, regexp_exclusion};

use super::shared::plural;
use crate::cli::{
    args::ExcludeCommand,
    context::{CommandContext, read_list},
    store::CANDIDATES,
};

/// Removes candidates matching exclusion regexps or listed terms.
pub fn run(ctx: &CommandContext, cmd: &ExcludeCommand) -> ExitCode {
    let mut regexp_files: Vec<PathBuf> = ctx.config.filter.exclusion_regexps.clone();
    regexp_files.extend(cmd.regexps.clone());

    if regexp_files.is_empty() && cmd.terms.is_none() {
        eprintln!("error: nothing to exclude");
        eprintln!("pass --regexps or --terms, or set exclusion_regexps in .termex.toml");
        return ExitCode::FAILURE;
    }

    let regexps = match load_regexps(&regexp_files) {
        Ok(regexps) => regexps,
        Err(code) => return code,
    };
    let mut table: CandidateTable = match ctx.load_table(CANDIDATES) {
        Ok(table) => table,
        Err(code) => return code,
    };

    if !regexps.is_empty() {
        let (kept, removed) = regexp_exclusion(&table, &regexps);
        println!(
            "Regexp exclusion: removed {} with {}",
            plural(removed, "candidate"),
            plural(regexps.len(), "regexp")
        );
        table = kept;
    }

    if let Some(path) = &cmd.terms {
        let terms: HashSet<String> = match read_list(path) {
            Ok(terms) => terms.into_iter().collect(),
            Err(code) => return code,
        };
        let before = table.len();
        table = exclude_terms(&table, &terms);
        println!(
            "Term exclusion: removed {}",
            plural(before - table.len(), "candidate")
        );
    }

    match ctx.save_table(CANDIDATES, &table) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

/// Compiles every regexp line of the given files.
fn load_regexps(files: &[PathBuf]) -> Result<Vec<ExclusionRegex>, ExitCode> {
    let mut regexps = Vec::new();
    for path in files {
        for line in read_list(path)? {
            let regex = ExclusionRegex::new(&line).map_err(|e| {
                eprintln!("error: {}: {e}", path.display());
                ExitCode::FAILURE
            })?;
            regexps.push(regex);
        }
    }
    Ok(regexps)
}
