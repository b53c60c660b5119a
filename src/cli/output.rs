//! Output formatting for CLI commands.

use std::io::Write;

use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::token::Token;

const END_OF_SENTENCE: &str = "EOS";

/// Write the tokens of one input in the requested format.
pub fn write_tokens<W: Write>(
    out: &mut W,
    tokens: &[Token],
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Human => write_human(out, tokens),
        OutputFormat::Json => write_json(out, tokens, pretty),
    }
}

/// Output in human-readable format.
fn write_human<W: Write>(out: &mut W, tokens: &[Token]) -> Result<()> {
    for token in tokens {
        writeln!(out, "{}\t{}", token.text, token.details.join(","))?;
    }
    writeln!(out, "{END_OF_SENTENCE}")?;
    Ok(())
}

/// Output as JSON, one array per input.
fn write_json<W: Write>(out: &mut W, tokens: &[Token], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, tokens)?;
    } else {
        serde_json::to_writer(&mut *out, tokens)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Write the available filter kinds.
pub fn write_filter_kinds<W: Write>(
    out: &mut W,
    character_filters: &[&str],
    token_filters: &[&str],
) -> Result<()> {
    writeln!(out, "Character filters:")?;
    for kind in character_filters {
        writeln!(out, "  {kind}")?;
    }
    writeln!(out, "Token filters:")?;
    for kind in token_filters {
        writeln!(out, "  {kind}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<Token> {
        vec![
            Token::new("東京", 0, 6, vec!["名詞".to_string(), "固有名詞".to_string()]),
            Token::new("Ω", 6, 8, vec!["UNK".to_string()]).with_position(1),
        ]
    }

    #[test]
    fn test_human_output() {
        let mut out = Vec::new();
        write_tokens(&mut out, &tokens(), OutputFormat::Human, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "東京\t名詞,固有名詞\nΩ\tUNK\nEOS\n");
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_tokens(&mut out, &tokens(), OutputFormat::Json, false).unwrap();

        let parsed: Vec<Token> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, tokens());

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[1]["byte_start"], 6);
        assert_eq!(value[1]["position"], 1);
        assert_eq!(value[0]["word_id"]["kind"], "unknown");
    }

    #[test]
    fn test_empty_input_still_ends_sentence() {
        let mut out = Vec::new();
        write_tokens(&mut out, &[], OutputFormat::Human, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "EOS\n");
    }
}
