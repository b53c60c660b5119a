//! Command implementations for the shikiri CLI.

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::char_filter::CharFilterLoader;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::token_filter::TokenFilterLoader;
use crate::tokenizer::{Tokenizer, TokenizerBuilder};

/// Execute a CLI command.
pub fn execute_command(args: ShikiriArgs) -> Result<()> {
    match &args.command {
        Command::Tokenize(tokenize_args) => tokenize(tokenize_args, &args),
        Command::Filters => list_filters(),
    }
}

/// Build a tokenizer from the config file (if any), then apply the command
/// line overrides.
pub fn build_tokenizer(args: &TokenizeArgs) -> Result<Tokenizer> {
    let mut builder = match &args.config {
        Some(path) => {
            debug!("loading tokenizer config from {}", path.display());
            TokenizerBuilder::from_file(path)?
        }
        None => TokenizerBuilder::new(),
    };

    if let Some(root) = &args.dictionary_root {
        builder.set_dictionary_root(root)?;
    }
    if let Some(dictionary) = &args.dictionary {
        builder.set_dictionary(dictionary)?;
    }
    if let Some(kind) = &args.user_dictionary_kind {
        builder.set_user_dictionary_kind(kind)?;
    }
    if let Some(user_dictionary) = &args.user_dictionary {
        builder.set_user_dictionary(user_dictionary)?;
    }
    if let Some(mode) = &args.mode {
        builder.set_mode(mode)?;
    }

    builder.build()
}

/// Tokenize the text argument, or every line of stdin.
fn tokenize(args: &TokenizeArgs, cli_args: &ShikiriArgs) -> Result<()> {
    let tokenizer = build_tokenizer(args)?;
    if cli_args.verbosity() > 1 {
        info!("tokenizer ready: {tokenizer:?}");
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match &args.text {
        Some(text) => {
            let tokens = tokenizer.tokenize(text)?;
            write_tokens(&mut out, &tokens, args.output, args.pretty)?;
        }
        None => {
            let lines = io::stdin()
                .lock()
                .lines()
                .collect::<io::Result<Vec<String>>>()?;
            debug!("read {} lines from stdin", lines.len());

            for tokens in tokenizer.tokenize_batch(&lines)? {
                write_tokens(&mut out, &tokens, args.output, args.pretty)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// List the filter kinds accepted by the builder.
fn list_filters() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_filter_kinds(&mut out, CharFilterLoader::KINDS, TokenFilterLoader::KINDS)
}
