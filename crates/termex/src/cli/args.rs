//! Clap argument definitions for the `termex` CLI.

use std::{env, path::PathBuf, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use termex_extract::{AssociationMeasure, SortOrder, TsrPolicy};

/// Default state directory, relative to the working directory.
pub const DEFAULT_STATE_DIR: &str = ".termex";

/// Default number of candidates shown by `termex list`.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Default representativity for `termex learn-patterns`, in percent.
pub const DEFAULT_REPRESENTATIVITY: f64 = 80.0;

/// Parse an association measure from a string.
fn parse_measure(s: &str) -> Result<AssociationMeasure, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Parse a TSR policy from a string.
fn parse_policy(s: &str) -> Result<TsrPolicy, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Parse a sort order from a string.
fn parse_order(s: &str) -> Result<SortOrder, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "termex")]
#[command(about = "Terminology extraction - candidate terms from monolingual corpora")]
pub struct Cli {
    /// Directory holding the stored tables
    #[arg(long, global = true, default_value = DEFAULT_STATE_DIR)]
    pub state: PathBuf,

    /// Verbosity level (-v for stage summaries, -vv for per-record detail)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared order range overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct OrderArgs {
    /// Smallest n-gram order [default: 1]
    #[arg(long)]
    pub n_min: Option<usize>,

    /// Largest n-gram order [default: 3]
    #[arg(long)]
    pub n_max: Option<usize>,
}

/// Arguments for `termex ngrams`.
#[derive(Args, Debug, Clone)]
pub struct NgramsCommand {
    /// Corpus file, one segment per line
    pub corpus: PathBuf,

    /// Corpus is tagged: tokens are form|lemma|tag
    #[arg(long)]
    pub tagged: bool,

    #[command(flatten)]
    /// Order range overrides.
    pub orders: OrderArgs,
}

/// Arguments for `termex extract`.
#[derive(Args, Debug, Clone)]
pub struct ExtractCommand {
    /// Minimum n-gram frequency [default: 2]
    #[arg(long)]
    pub min_frequency: Option<u64>,

    /// Extract from a single stored segment and print its terms
    #[arg(long)]
    pub segment: Option<u64>,
}

/// Arguments for `termex linguistic`.
#[derive(Args, Debug, Clone)]
pub struct LinguisticCommand {
    /// Pattern file, one pattern per line
    #[arg(long)]
    pub patterns: PathBuf,

    /// Minimum tagged n-gram frequency [default: 2]
    #[arg(long)]
    pub min_frequency: Option<u64>,
}

/// Arguments for `termex score`.
#[derive(Args, Debug, Clone)]
pub struct ScoreCommand {
    /// Association measure [default: loglikelihood]
    #[arg(short = 'm', long, value_parser = parse_measure)]
    pub measure: Option<AssociationMeasure>,

    /// Candidate orders to score (can be specified multiple times) [default: 2 up to n_max]
    #[arg(long = "order")]
    pub orders: Vec<usize>,
}

/// Arguments for `termex normalize`.
#[derive(Args, Debug, Clone)]
pub struct NormalizeCommand {
    /// Merge case variants
    #[arg(long)]
    pub case: bool,

    /// Prune nested candidates
    #[arg(long)]
    pub nested: bool,

    /// Frequency band for nested pruning, in percent [default: 10]
    #[arg(long)]
    pub percent: Option<f64>,
}

/// Arguments for `termex exclude`.
#[derive(Args, Debug, Clone)]
pub struct ExcludeCommand {
    /// Exclusion regexp file (adds to the configured files)
    #[arg(long)]
    pub regexps: Option<PathBuf>,

    /// Term list whose entries are removed
    #[arg(long)]
    pub terms: Option<PathBuf>,
}

/// Arguments for `termex tsr`.
#[derive(Args, Debug, Clone)]
pub struct TsrCommand {
    /// Seed term file, one term per line
    #[arg(long)]
    pub seeds: PathBuf,

    /// Propagation policy: strict, flexible, combined [default: combined]
    #[arg(short = 'p', long, value_parser = parse_policy)]
    pub policy: Option<TsrPolicy>,

    /// Iteration cap
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// Print the final lexicons as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `termex learn-patterns`.
#[derive(Args, Debug, Clone)]
pub struct LearnPatternsCommand {
    /// Gold term file, one term per line
    #[arg(long)]
    pub terms: PathBuf,

    /// Percentage of total weight the learned patterns cover [default: 80]
    #[arg(long)]
    pub representativity: Option<f64>,

    /// Write the patterns to this file, one per line
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `termex list`.
#[derive(Args, Debug, Clone)]
pub struct ListCommand {
    /// Maximum candidates to show [default: 50]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Value ordering: desc, asc
    #[arg(long, default_value = "desc", value_parser = parse_order)]
    pub order: SortOrder,

    #[command(flatten)]
    /// Order range filter.
    pub orders: OrderArgs,

    /// Mark candidates found in this term list
    #[arg(long)]
    pub terms: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `termex evaluate`.
#[derive(Args, Debug, Clone)]
pub struct EvaluateCommand {
    /// Gold term file, one term per line
    #[arg(long)]
    pub terms: PathBuf,

    /// Seed term file whose entries also count as gold terms
    #[arg(long)]
    pub seeds: Option<PathBuf>,

    /// Number of top candidates judged
    #[arg(short = 'n', long)]
    pub limit: usize,

    /// Value ordering: desc, asc
    #[arg(long, default_value = "desc", value_parser = parse_order)]
    pub order: SortOrder,

    /// Randomized rankings averaged [default: 1000]
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Compare case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Largest candidate order considered
    #[arg(long)]
    pub n_max: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `termex unigrams`.
#[derive(Args, Debug, Clone)]
pub struct UnigramsCommand {
    /// Token position; negative values count from the end
    #[arg(long, default_value = "-1", allow_hyphen_values = true)]
    pub position: isize,

    /// Maximum unigrams to show [default: 50]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `termex compound`.
#[derive(Args, Debug, Clone)]
pub struct CompoundCommand {
    /// Term file, one term per line
    #[arg(long)]
    pub terms: PathBuf,
}

/// Supported `termex` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Load a corpus and count its n-grams
    Ngrams(NgramsCommand),

    /// Extract candidates from n-grams with stop-word filtering
    Extract(ExtractCommand),

    /// Extract candidates from tagged n-grams with linguistic patterns
    #[command(after_help = "\
PATTERN SYNTAX:
  One pattern per line. Tokens are separated by spaces, fields by '|'
  (form|lemma|tag). Field specs:

  #          Capture the field
  #word      Capture the literal 'word'
  (empty)    Any value, not captured
  NN.*       Regex fragment matched against the field

EXAMPLES:
  |#|JJ #|#|NN     adjective + noun, lemmas captured
  #||NN #||NN      noun + noun, forms captured")]
    Linguistic(LinguisticCommand),

    /// Score candidates with an association measure
    #[command(after_help = "\
MEASURES:
  raw_freq, loglikelihood, pmi, poisson_stirling, true_mi, chi_sq,
  chi_sq_nsp_text, phi_sq, dice, jaccard, student_t, odds_ratio,
  z_score, mi, mi2, mi3

  Not every measure is defined for every order; unsupported orders are
  skipped with a warning.")]
    Score(ScoreCommand),

    /// Merge case variants and prune nested candidates
    Normalize(NormalizeCommand),

    /// Remove candidates matching exclusion regexps or a term list
    Exclude(ExcludeCommand),

    /// Grow accepted terms from seeds by termhood propagation
    Tsr(TsrCommand),

    /// Learn linguistic patterns from gold terms
    #[command(name = "learn-patterns")]
    LearnPatterns(LearnPatternsCommand),

    /// List ranked candidates
    List(ListCommand),

    /// Evaluate ranked candidates against gold terms
    Evaluate(EvaluateCommand),

    /// Aggregate candidates into unigrams by token position
    Unigrams(UnigramsCommand),

    /// Join occurrences of multi-word terms in the stored corpus
    Compound(CompoundCommand),

    /// Show effective configuration settings
    Config,
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_command_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints top-level help with one line per subcommand.
fn print_command_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: termex [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:15} {about}");
    }

    println!(
        "  {:<15} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("      --state <STATE>  Directory holding the stored tables [default: {DEFAULT_STATE_DIR}]");
    println!("  -v, --verbose...     Verbosity level");
    println!("  -h, --help           Print help");
}

#[cfg(test)]
mod tests {
    use termex_config::{NgramSettings, NormalizeSettings, TsrSettings};

    use super::*;

    /// Gets help text for a subcommand's argument.
    fn get_arg_help(cmd: &clap::Command, subcmd: &str, arg: &str) -> String {
        cmd.get_subcommands()
            .find(|c| c.get_name() == subcmd)
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default()
    }

    /// Verifies that help text defaults match the configuration defaults.
    #[test]
    fn cli_help_defaults_match_settings() {
        let cmd = Cli::command();
        let ngrams = NgramSettings::default();

        let min_freq_help = get_arg_help(&cmd, "extract", "min_frequency");
        assert!(
            min_freq_help.contains(&format!("[default: {}]", ngrams.min_frequency)),
            "extract --min-frequency help: {min_freq_help}"
        );

        let n_max_help = get_arg_help(&cmd, "ngrams", "n_max");
        assert!(
            n_max_help.contains(&format!("[default: {}]", ngrams.n_max)),
            "ngrams --n-max help: {n_max_help}"
        );

        let percent_help = get_arg_help(&cmd, "normalize", "percent");
        assert!(
            percent_help.contains(&format!(
                "[default: {}]",
                NormalizeSettings::default().nest_percent
            )),
            "normalize --percent help: {percent_help}"
        );

        let policy_help = get_arg_help(&cmd, "tsr", "policy");
        assert!(
            policy_help.contains(&format!("[default: {}]", TsrSettings::default().policy)),
            "tsr --policy help: {policy_help}"
        );

        let limit_help = get_arg_help(&cmd, "list", "limit");
        assert!(limit_help.contains(&format!("[default: {DEFAULT_LIST_LIMIT}]")));

        let repr_help = get_arg_help(&cmd, "learn-patterns", "representativity");
        assert!(repr_help.contains(&format!("[default: {DEFAULT_REPRESENTATIVITY}]")));
    }

    #[test]
    fn parses_negative_position() {
        let cli = Cli::try_parse_from(["termex", "unigrams", "--position", "-2"]).unwrap();
        let Commands::Unigrams(cmd) = cli.command else {
            panic!("expected unigrams");
        };
        assert_eq!(cmd.position, -2);
    }

    #[test]
    fn rejects_unknown_measure() {
        let result = Cli::try_parse_from(["termex", "score", "--measure", "nonsense"]);
        assert!(result.is_err());
    }
}
