//! Command implementations and dispatch.

pub mod compound;
pub mod config;
pub mod evaluate;
pub mod exclude;
pub mod extract;
pub mod learn;
pub mod linguistic;
pub mod list;
pub mod ngrams;
pub mod normalize;
pub mod score;
mod shared;
pub mod tsr;
pub mod unigrams;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Ngrams(cmd) => ngrams::run(ctx, &cmd),
        Commands::Extract(cmd) => extract::run(ctx, &cmd),
        Commands::Linguistic(cmd) => linguistic::run(ctx, &cmd),
        Commands::Score(cmd) => score::run(ctx, &cmd),
        Commands::Normalize(cmd) => normalize::run(ctx, &cmd),
        Commands::Exclude(cmd) => exclude::run(ctx, &cmd),
        Commands::Tsr(cmd) => tsr::run(ctx, &cmd),
        Commands::LearnPatterns(cmd) => learn::run(ctx, &cmd),
        Commands::List(cmd) => list::run(ctx, &cmd),
        Commands::Evaluate(cmd) => evaluate::run(ctx, &cmd),
        Commands::Unigrams(cmd) => unigrams::run(ctx, &cmd),
        Commands::Compound(cmd) => compound::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
    }
}
