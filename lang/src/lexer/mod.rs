pub mod reader;
pub mod token;

pub use token::{lookup_identifier, Position, Span, Token, TokenKind};

use crate::error::{LexError, LexResult};
use reader::{CharReader, ReadError};
use std::io::BufRead;
use tracing::{debug, trace};


/// Tokenizes a complete in-memory source, up to and including the `EndOfFile` token.
pub fn tokenize(input: &str) -> LexResult<Vec<Token>> {
    let mut scanner = Scanner::from_source(input);
    scanner.initialize()?;

    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token()?;
        let is_eof = token.kind == TokenKind::EndOfFile;
        tokens.push(token);
        if is_eof {
            break;
        }
    }

    Ok(tokens)
}

/// Base of an integer literal introduced by a `0` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Octal,
    Hexadecimal,
}

impl Radix {
    pub fn from_prefix(ch: char) -> Option<Self> {
        match ch {
            'b' => Some(Radix::Binary),
            'o' => Some(Radix::Octal),
            'x' => Some(Radix::Hexadecimal),
            _ => None,
        }
    }

    pub fn prefix(self) -> char {
        match self {
            Radix::Binary => 'b',
            Radix::Octal => 'o',
            Radix::Hexadecimal => 'x',
        }
    }

    /// Whether `ch` may appear after the prefix. `_` is a digit separator in every base.
    pub fn accepts(self, ch: char) -> bool {
        match self {
            Radix::Binary => matches!(ch, '0' | '1' | '_'),
            Radix::Octal => matches!(ch, '0'..='7' | '_'),
            Radix::Hexadecimal => ch.is_ascii_hexdigit() || ch == '_',
        }
    }
}

/// Shape of a numeric literal, decided before any of it is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeral {
    Decimal,
    Prefixed(Radix),
}

/// Decides how a literal starting with `0` continues, given the character after the `0`.
///
/// Returns the offending character when a letter other than a radix prefix follows.
pub fn classify_after_zero(peeked: Option<char>) -> Result<Numeral, char> {
    match peeked {
        Some(ch) => match Radix::from_prefix(ch) {
            Some(radix) => Ok(Numeral::Prefixed(radix)),
            None if ch.is_ascii_alphabetic() => Err(ch),
            None => Ok(Numeral::Decimal),
        },
        None => Ok(Numeral::Decimal),
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '_'
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

/// Pull-based tokenizer over a character stream.
///
/// `ch` is the character under the cursor (`None` once the input is exhausted) and `current` is
/// its position. `next` is the position of the character the reader will produce next, which is
/// where read and peek failures are reported.
pub struct Scanner<R> {
    reader: CharReader<R>,
    ch: Option<char>,
    current: Position,
    next: Position,
    primed: bool,
    finished: bool,
}

impl<'a> Scanner<&'a [u8]> {
    pub fn from_source(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }
}

impl<R: BufRead> Scanner<R> {
    pub fn new(input: R) -> Self {
        Self {
            reader: CharReader::new(input),
            ch: None,
            current: Position::start(),
            next: Position::start(),
            primed: false,
            finished: false,
        }
    }

    /// Reads the first character. Only the first call has any effect.
    pub fn initialize(&mut self) -> LexResult<()> {
        if self.primed {
            return Ok(());
        }
        self.primed = true;
        trace!("priming scanner");
        self.read_char()
    }

    /// Position of the character under the cursor.
    pub fn position(&self) -> Position {
        self.current
    }

    /// Returns the next token, skipping any whitespace before it.
    ///
    /// Once the input is exhausted every call returns an `EndOfFile` token at the same position.
    /// A failed call leaves the cursor at end of input, so later calls return `EndOfFile`.
    pub fn next_token(&mut self) -> LexResult<Token> {
        self.initialize()?;
        self.skip_whitespace()?;

        let start = self.current;
        let token = match self.ch {
            None => Token::new(TokenKind::EndOfFile, "", Span::point(start)),
            Some(ch) => {
                if let Some(kind) = TokenKind::from_single_char(ch) {
                    self.read_char()?;
                    Token::new(kind, ch, Span::point(start))
                } else if is_letter(ch) {
                    self.scan_identifier(start)?
                } else if ch.is_ascii_digit() {
                    self.scan_number(start)?
                } else {
                    self.read_char()?;
                    Token::new(TokenKind::Unknown, ch, Span::point(start))
                }
            }
        };

        trace!(kind = %token.kind, literal = %token.literal, span = %token.span, "token");
        Ok(token)
    }

    fn scan_identifier(&mut self, start: Position) -> LexResult<Token> {
        let mut literal = String::new();
        self.eat_while(&mut literal, is_letter)?;

        let kind = lookup_identifier(&literal);
        Ok(Token::new(kind, literal, Span::new(start, self.run_end())))
    }

    fn scan_number(&mut self, start: Position) -> LexResult<Token> {
        let numeral = if self.ch == Some('0') {
            let peeked = match self.reader.peek_char() {
                Ok(peeked) => peeked,
                Err(err) => {
                    self.ch = None;
                    return Err(self.read_error(err));
                }
            };
            match classify_after_zero(peeked) {
                Ok(numeral) => numeral,
                Err(prefix) => {
                    self.ch = None;
                    return Err(self.prefix_error(prefix));
                }
            }
        } else {
            Numeral::Decimal
        };

        let mut literal = String::new();
        match numeral {
            Numeral::Decimal => self.eat_while(&mut literal, is_decimal_digit)?,
            Numeral::Prefixed(radix) => {
                self.bump(&mut literal)?;
                literal.push(radix.prefix());
                self.read_char()?;
                self.eat_while(&mut literal, |ch| radix.accepts(ch))?;
            }
        }

        Ok(Token::new(TokenKind::Integer, literal, Span::new(start, self.run_end())))
    }

    fn skip_whitespace(&mut self) -> LexResult<()> {
        while self.ch.is_some_and(is_whitespace) {
            self.read_char()?;
        }
        Ok(())
    }

    fn eat_while(&mut self, literal: &mut String, predicate: impl Fn(char) -> bool) -> LexResult<()> {
        while self.ch.is_some_and(&predicate) {
            self.bump(literal)?;
        }
        Ok(())
    }

    fn bump(&mut self, literal: &mut String) -> LexResult<()> {
        if let Some(ch) = self.ch {
            literal.push(ch);
        }
        self.read_char()
    }

    /// End of a run that stopped at the cursor; the run never crosses a line.
    fn run_end(&self) -> Position {
        Position::new(self.current.line, self.current.column - 1)
    }

    fn read_char(&mut self) -> LexResult<()> {
        match self.reader.read_char() {
            Ok(ch) => {
                self.ch = ch;
                self.current = self.next;
                if let Some(ch) = ch {
                    self.next = self.next.after(ch);
                }
                Ok(())
            }
            Err(err) => {
                self.ch = None;
                Err(self.read_error(err))
            }
        }
    }

    fn read_error(&self, err: ReadError) -> LexError {
        let position = self.next;
        let error = match err {
            ReadError::Io(source) => LexError::IoFailure { position, source },
            ReadError::InvalidEncoding(bytes) => LexError::InvalidEncoding { position, bytes },
        };
        debug!(kind = error.kind(), %position, "lexer error: {}", error.message());
        error
    }

    fn prefix_error(&self, prefix: char) -> LexError {
        let position = self.next;
        debug!(%prefix, %position, "lexer error: unrecognized integer prefix");
        LexError::UnrecognizedPrefix { prefix, position }
    }
}

impl<R: BufRead> Iterator for Scanner<R> {
    type Item = LexResult<Token>;

    /// Yields every token including a single `EndOfFile`, then stops. Errors are terminal.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        self.finished = match &result {
            Ok(token) => token.kind == TokenKind::EndOfFile,
            Err(_) => true,
        };
        Some(result)
    }
}
