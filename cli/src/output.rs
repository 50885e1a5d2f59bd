//! CLI output formatting for JSON and JSONL modes.
//!
//! Machine-readable token dumps for editors, test harnesses and other tools.

use monkey_lang::lexer::{Position, Token};
use monkey_lang::LexError;
use serde::Serialize;
use std::io::{self, Write};

/// Output mode for CLI execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One human-readable line per token (default)
    Text,
    /// Single JSON object after scanning completes
    Json,
    /// Real-time streaming with JSON Lines
    Jsonl,
}

/// Source location with 1-indexed line and column.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JsonPosition {
    pub line: u32,
    pub column: u32,
}

impl From<Position> for JsonPosition {
    fn from(position: Position) -> Self {
        Self {
            line: position.line,
            column: position.column,
        }
    }
}

/// A single token for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct JsonToken {
    pub kind: &'static str,
    pub literal: String,
    pub start: JsonPosition,
    pub end: JsonPosition,
}

impl From<&Token> for JsonToken {
    fn from(token: &Token) -> Self {
        Self {
            kind: token.kind.name(),
            literal: token.literal.clone(),
            start: token.span.start.into(),
            end: token.span.end.into(),
        }
    }
}

/// JSON output for a complete token stream.
#[derive(Debug, Clone, Serialize)]
pub struct JsonTokensOutput {
    #[serde(rename = "type")]
    pub output_type: &'static str,
    pub tokens: Vec<JsonToken>,
}

/// JSON output for errors.
#[derive(Debug, Clone, Serialize)]
pub struct JsonErrorOutput {
    #[serde(rename = "type")]
    pub output_type: &'static str,
    pub kind: &'static str,
    pub message: String,
    pub location: JsonPosition,
}

impl From<&LexError> for JsonErrorOutput {
    fn from(error: &LexError) -> Self {
        Self {
            output_type: "error",
            kind: error.kind(),
            message: error.message(),
            location: error.position().into(),
        }
    }
}

/// Format a token stream as a single JSON document.
pub fn format_tokens_json(tokens: &[Token]) -> serde_json::Result<String> {
    let output = JsonTokensOutput {
        output_type: "tokens",
        tokens: tokens.iter().map(JsonToken::from).collect(),
    };
    serde_json::to_string(&output)
}

/// Format a LexError as JSON error output.
pub fn format_error_json(error: &LexError) -> serde_json::Result<String> {
    serde_json::to_string(&JsonErrorOutput::from(error))
}

/// JSONL streaming writer.
pub struct JsonlWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one token line.
    pub fn write_token(&mut self, token: &Token) -> io::Result<()> {
        self.write_line(&JsonToken::from(token))
    }

    /// Write one error line.
    pub fn write_error(&mut self, error: &LexError) -> io::Result<()> {
        self.write_line(&JsonErrorOutput::from(error))
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        let json = serde_json::to_string(value)?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()
    }
}
