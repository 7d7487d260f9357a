//! CLI support for the `termex` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
pub mod store;

pub use context::CommandContext;
use log::LevelFilter;

/// Initializes logging to stderr.
///
/// Warnings are shown by default; `-v` adds stage summaries and `-vv` adds
/// per-record detail. `RUST_LOG` overrides both.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
