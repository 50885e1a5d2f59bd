use std::fmt;

/// Position in source code (line and column, both 1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position of the first character of any input.
    pub fn start() -> Self {
        Self::new(1, 1)
    }

    /// The position following `ch`, which was read at `self`.
    pub(crate) fn after(self, ch: char) -> Self {
        if ch == '\n' {
            Self::new(self.line + 1, 1)
        } else {
            Self::new(self.line, self.column + 1)
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Inclusive range in source code covered by a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span of a single-character or zero-width token.
    pub fn point(position: Position) -> Self {
        Self::new(position, position)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Identifier,
    Integer,

    // Operators
    Assign,      // =
    Plus,        // +
    Minus,       // -
    Asterisk,    // *
    Slash,       // /
    Bang,        // !
    LessThan,    // <
    GreaterThan, // >

    // Delimiters
    Semicolon,  // ;
    Comma,      // ,
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,

    // Any character no other rule matches
    Unknown,

    // End of input
    EndOfFile,
}

impl TokenKind {
    /// Kind of a character that always forms a token on its own.
    pub fn from_single_char(ch: char) -> Option<Self> {
        let kind = match ch {
            '=' => TokenKind::Assign,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '!' => TokenKind::Bang,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            _ => return None,
        };
        Some(kind)
    }

    /// Stable name used in machine-readable output.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer => "INTEGER",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::Bang => "BANG",
            TokenKind::LessThan => "LESS_THAN",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::EndOfFile => "EOF",
        }
    }

    pub fn is_keyword(&self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| kind == self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reserved words, matched only after a complete identifier has been read.
pub static KEYWORDS: &[(&str, TokenKind)] = &[
    ("fn", TokenKind::Function),
    ("let", TokenKind::Let),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("return", TokenKind::Return),
];

/// Turns keywords into their kind; everything else is an identifier.
pub fn lookup_identifier(ident: &str) -> TokenKind {
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == ident)
        .map(|(_, kind)| *kind)
        .unwrap_or(TokenKind::Identifier)
}

/// Token with its exact source text and position information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.span, self.kind, self.literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_looked_up() {
        assert_eq!(lookup_identifier("fn"), TokenKind::Function);
        assert_eq!(lookup_identifier("let"), TokenKind::Let);
        assert_eq!(lookup_identifier("true"), TokenKind::True);
        assert_eq!(lookup_identifier("false"), TokenKind::False);
        assert_eq!(lookup_identifier("if"), TokenKind::If);
        assert_eq!(lookup_identifier("else"), TokenKind::Else);
        assert_eq!(lookup_identifier("return"), TokenKind::Return);
    }

    #[test]
    fn non_keywords_are_identifiers() {
        for ident in ["Let", "func", "returns", "_", "iff", "True"] {
            assert_eq!(lookup_identifier(ident), TokenKind::Identifier, "{ident}");
        }
    }

    #[test]
    fn keyword_kinds() {
        assert!(TokenKind::Return.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
        assert!(!TokenKind::Assign.is_keyword());
    }

    #[test]
    fn position_advances_past_characters() {
        let pos = Position::new(3, 7);
        assert_eq!(pos.after('x'), Position::new(3, 8));
        assert_eq!(pos.after('\t'), Position::new(3, 8));
        assert_eq!(pos.after('\n'), Position::new(4, 1));
    }

    #[test]
    fn display_formats() {
        let span = Span::new(Position::new(1, 1), Position::new(1, 3));
        assert_eq!(span.to_string(), "1:1-1:3");
        let token = Token::new(TokenKind::Let, "let", span);
        assert_eq!(token.to_string(), r#"1:1-1:3 LET "let""#);
        assert_eq!(Span::point(Position::start()).to_string(), "1:1-1:1");
    }
}
