//! Tokens shared by the lexer, parser and printer.

/// The reserved words of Go.
pub const KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Check whether `word` is a Go keyword.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Keyword,
    /// Integer, floating-point and imaginary literals.
    Number,
    Rune,
    String,
    RawString,
    LineComment,
    BlockComment,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Ellipsis,
    /// Arithmetic, logical, comparison, assignment and channel operators.
    Operator,
}

/// A lexed token together with the layout information the printer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line of the first character (0 for synthesized tokens).
    pub line: usize,
    /// 1-based column of the first character, counted in characters.
    pub column: usize,
    /// Byte offset of the first character in the source.
    pub offset: usize,
    /// Line breaks between the end of the previous token and this one.
    pub newlines_before: usize,
    /// Whether this token was separated from the previous one by
    /// horizontal whitespace on the same line.
    pub space_before: bool,
}

impl Token {
    /// Create a token that does not come from any source text.
    pub fn synthetic(kind: TokenKind, text: impl Into<String>, newlines_before: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line: 0,
            column: 0,
            offset: 0,
            newlines_before,
            space_before: newlines_before == 0,
        }
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Number | TokenKind::Rune | TokenKind::String | TokenKind::RawString
        )
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    pub fn is_close(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }

    /// The text of the delimiter that closes this opening delimiter.
    pub fn closer(&self) -> Option<&'static str> {
        match self.kind {
            TokenKind::LParen => Some(")"),
            TokenKind::LBracket => Some("]"),
            TokenKind::LBrace => Some("}"),
            _ => None,
        }
    }

    /// Whether this token can end an operand, i.e. an operator that follows
    /// it is binary.
    pub fn is_operand_end(&self) -> bool {
        self.kind == TokenKind::Ident
            || self.is_literal()
            || matches!(
                self.kind,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
            )
    }

    /// Whether a line break after this token terminates the statement
    /// (Go's automatic semicolon insertion rule).
    pub fn ends_statement(&self) -> bool {
        match self.kind {
            TokenKind::Keyword => matches!(
                self.text.as_str(),
                "break" | "continue" | "fallthrough" | "return"
            ),
            TokenKind::Operator => matches!(self.text.as_str(), "++" | "--"),
            _ => self.is_operand_end(),
        }
    }

    /// Whether a line break after this token carries the expression over to
    /// the next line.
    pub fn continues_line(&self) -> bool {
        match self.kind {
            TokenKind::Operator => !matches!(self.text.as_str(), "++" | "--"),
            TokenKind::Dot => true,
            _ => false,
        }
    }

    /// Whether this token contains a line break of its own (raw strings and
    /// block comments may span lines).
    pub fn spans_lines(&self) -> bool {
        self.text.contains('\n')
    }

    /// Human readable form used in parse errors.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Ident => format!("IDENT {}", self.text),
            TokenKind::Number | TokenKind::Rune | TokenKind::String | TokenKind::RawString => {
                format!("literal {}", self.text)
            }
            TokenKind::LineComment | TokenKind::BlockComment => "comment".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}
