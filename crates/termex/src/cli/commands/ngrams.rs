//! Implementation of `termex ngrams`.

use std::process::ExitCode;

use termex_extract::{Corpus, TaggedCorpus, collect_ngrams, collect_tagged_ngrams};

use super::shared::{plural, read_text};
use crate::cli::{
    args::NgramsCommand,
    context::CommandContext,
    store::{CORPUS, NGRAMS, TAGGED_CORPUS, TAGGED_NGRAMS},
};

/// Loads a corpus file and stores the corpus with its n-gram counts.
pub fn run(ctx: &CommandContext, cmd: &NgramsCommand) -> ExitCode {
    let contents = match read_text(&cmd.corpus) {
        Ok(contents) => contents,
        Err(code) => return code,
    };
    let settings = ctx.ngram_settings(&cmd.orders);

    let result = if cmd.tagged {
        let corpus = TaggedCorpus::from_lines(contents.lines());
        let ngrams = collect_tagged_ngrams(&corpus, &settings);
        ctx.save_table(TAGGED_CORPUS, &corpus)
            .and_then(|()| ctx.save_table(TAGGED_NGRAMS, &ngrams))
            .map(|()| (corpus.len(), ngrams.len(), None))
    } else {
        let corpus = Corpus::from_lines(contents.lines());
        let counts = collect_ngrams(&corpus, ctx.tokenizer(), &settings);
        ctx.save_table(CORPUS, &corpus)
            .and_then(|()| ctx.save_table(NGRAMS, &counts))
            .map(|()| (corpus.len(), counts.ngrams.len(), Some(counts.tokens.total())))
    };

    match result {
        Ok((segments, ngrams, tokens)) => {
            let kind = if cmd.tagged { "tagged n-gram" } else { "n-gram" };
            print!("Loaded {}: {}", plural(segments, "segment"), plural(ngrams, kind));
            if let Some(tokens) = tokens {
                print!(", {tokens} tokens");
            }
            println!();
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}
