//! Command line argument parsing for the shikiri CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Shikiri - a dictionary-driven morphological tokenizer
#[derive(Parser, Debug, Clone)]
#[command(name = "shikiri")]
#[command(about = "A dictionary-driven morphological tokenizer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ShikiriArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ShikiriArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tokenize text given as an argument or read line by line from stdin
    Tokenize(TokenizeArgs),

    /// List the available character and token filter kinds
    Filters,
}

/// Arguments for tokenizing
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Directory holding named dictionaries for `dict://<kind>`
    #[arg(long = "dict-root", value_name = "DIR", env = "SHIKIRI_DICTIONARY_DIR")]
    pub dictionary_root: Option<String>,

    /// Dictionary (`file://<dir>`, `dict://<kind>` or a path)
    #[arg(short, long = "dict", value_name = "DIR", env = "SHIKIRI_DICTIONARY")]
    pub dictionary: Option<String>,

    /// User dictionary CSV (lexicon rows or `surface,pos,reading` rows)
    #[arg(short, long = "user-dict", value_name = "CSV")]
    pub user_dictionary: Option<String>,

    /// Detail layout for simple user rows (ipadic, unidic, ko-dic, cc-cedict)
    #[arg(long = "user-dict-kind", value_name = "KIND")]
    pub user_dictionary_kind: Option<String>,

    /// Segmentation mode (normal or decompose)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Tokenizer config file (JSON); command line options override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "human")]
    pub output: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Text to tokenize (stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One token per line: surface, a tab, then the comma-joined details; `EOS` ends each input
    Human,
    /// A JSON array of tokens per input
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_tokenize_command() {
        let args = ShikiriArgs::try_parse_from([
            "shikiri",
            "tokenize",
            "--dict",
            "file:///opt/ipadic",
            "--mode",
            "decompose",
            "--output",
            "json",
            "関西国際空港",
        ])
        .unwrap();

        if let Command::Tokenize(tokenize_args) = args.command {
            assert_eq!(tokenize_args.dictionary.as_deref(), Some("file:///opt/ipadic"));
            assert_eq!(tokenize_args.mode.as_deref(), Some("decompose"));
            assert_eq!(tokenize_args.output, OutputFormat::Json);
            assert_eq!(tokenize_args.text.as_deref(), Some("関西国際空港"));
            assert!(tokenize_args.config.is_none());
        } else {
            panic!("Expected Tokenize command");
        }
    }

    #[test]
    fn test_named_dictionary_flags() {
        let args = ShikiriArgs::try_parse_from([
            "shikiri",
            "tokenize",
            "--dict-root",
            "/usr/local/share/shikiri",
            "--dict",
            "dict://ipadic",
            "--user-dict-kind",
            "ipadic",
            "東京タワー",
        ])
        .unwrap();

        let Command::Tokenize(tokenize_args) = args.command else {
            panic!("Expected Tokenize command");
        };
        assert_eq!(
            tokenize_args.dictionary_root.as_deref(),
            Some("/usr/local/share/shikiri")
        );
        assert_eq!(tokenize_args.dictionary.as_deref(), Some("dict://ipadic"));
        assert_eq!(tokenize_args.user_dictionary_kind.as_deref(), Some("ipadic"));
    }

    #[test]
    fn test_config_file_and_stdin() {
        let args =
            ShikiriArgs::try_parse_from(["shikiri", "tokenize", "--config", "shikiri.json"])
                .unwrap();

        if let Command::Tokenize(tokenize_args) = args.command {
            assert_eq!(tokenize_args.config, Some(PathBuf::from("shikiri.json")));
            assert_eq!(tokenize_args.output, OutputFormat::Human);
            assert!(tokenize_args.text.is_none());
        } else {
            panic!("Expected Tokenize command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = ShikiriArgs::try_parse_from(["shikiri", "filters"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = ShikiriArgs::try_parse_from(["shikiri", "-vv", "filters"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = ShikiriArgs::try_parse_from(["shikiri", "filters", "--quiet"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_invalid_output_format() {
        let result =
            ShikiriArgs::try_parse_from(["shikiri", "tokenize", "--output", "yaml", "text"]);
        assert!(result.is_err());
    }
}
