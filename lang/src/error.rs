//! Fatal scanning errors.
//!
//! Every error aborts the current tokenization attempt; the scanner performs no recovery. Each
//! variant carries the source position it occurred at so callers can surface a diagnostic.


use crate::lexer::token::Position;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    /// The input stream failed for a reason other than ordinary exhaustion.
    #[error("IOFailure at {position}: failed to read character: {source}")]
    IoFailure {
        position: Position,
        #[source]
        source: io::Error,
    },

    /// The input is not valid UTF-8 at `position`.
    #[error("EncodingError at {position}: invalid UTF-8 sequence {bytes:02X?}")]
    InvalidEncoding { position: Position, bytes: Vec<u8> },

    /// A `0` was followed by a letter that does not introduce a binary, octal or hexadecimal
    /// literal.
    #[error("LexError at {position}: unrecognized integer prefix {prefix:?}")]
    UnrecognizedPrefix { prefix: char, position: Position },
}

pub type LexResult<T> = Result<T, LexError>;

impl LexError {
    /// Get a short error kind description (e.g., "IOFailure", "LexError").
    pub fn kind(&self) -> &'static str {
        match self {
            LexError::IoFailure { .. } => "IOFailure",
            LexError::InvalidEncoding { .. } => "EncodingError",
            LexError::UnrecognizedPrefix { .. } => "LexError",
        }
    }

    /// Get the error message without its location.
    pub fn message(&self) -> String {
        match self {
            LexError::IoFailure { source, .. } => format!("failed to read character: {}", source),
            LexError::InvalidEncoding { bytes, .. } => format!("invalid UTF-8 sequence {:02X?}", bytes),
            LexError::UnrecognizedPrefix { prefix, .. } => format!("unrecognized integer prefix {:?}", prefix),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            LexError::IoFailure { position, .. }
            | LexError::InvalidEncoding { position, .. }
            | LexError::UnrecognizedPrefix { position, .. } => *position,
        }
    }
}
