//! Scanner for the Monkey scripting language.
//!
//! Converts a character stream into typed, position-tagged tokens for a downstream parser.

pub mod error;
pub mod lexer;

pub use error::{LexError, LexResult};
pub use lexer::{tokenize, Scanner};
