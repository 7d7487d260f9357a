//! Implementation of `termex config`.

use std::process::ExitCode;

use termex_config::discover_config_files;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows config files, effective settings, and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("{}", subheader("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none, using defaults)"));
    }
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    println!("{}", subheader("Effective settings:"));
    print!("{}", ctx.config.settings_to_toml());

    let warnings = ctx.config.validate();
    if !warnings.is_empty() {
        println!();
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
    }
    ExitCode::SUCCESS
}
