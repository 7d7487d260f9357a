//! Command-line interface for the `termex` terminology extractor.

use std::process::ExitCode;

use termex::cli::{CommandContext, args::parse_cli, commands, init_logging};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let ctx = match CommandContext::load(cli.state) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    commands::run(cli.command, &ctx)
}
