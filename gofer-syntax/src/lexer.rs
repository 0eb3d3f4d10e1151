//! Tokenizer for Go source text.

use logos::{Lexer, Logos};

use crate::{
    error::SyntaxError,
    token::{Token, TokenKind, is_keyword},
};

/// Raw tokens produced by logos. Whitespace and line breaks are kept so the
/// walker can record layout on the significant tokens.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[token("\n")]
    Newline,
    #[regex(r"[ \t\r\f\u{feff}]+")]
    Whitespace,
    #[token("//", line_comment)]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,
    #[regex(r"[0-9][0-9a-zA-Z_]*")]
    #[regex(r"[0-9][0-9_]*\.[0-9a-zA-Z_]*")]
    #[regex(r"\.[0-9][0-9a-zA-Z_]*")]
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?[eE][+-][0-9_]+i?")]
    #[regex(r"\.[0-9][0-9_]*[eE][+-][0-9_]+i?")]
    #[regex(r"0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?[pP][+-][0-9_]+i?")]
    Number,
    #[regex(r"'([^'\\\n]|\\[^\n])+'")]
    Rune,
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    String,
    #[token("`", raw_string)]
    RawString,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("<<")]
    #[token(">>")]
    #[token("&^")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&^=")]
    #[token("&&")]
    #[token("||")]
    #[token("<-")]
    #[token("++")]
    #[token("--")]
    #[token("==")]
    #[token("<")]
    #[token(">")]
    #[token("=")]
    #[token("!")]
    #[token("~")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token(":=")]
    Operator,
}

fn line_comment(lex: &mut Lexer<RawToken>) {
    let rest = lex.remainder();
    let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
    lex.bump(end);
}

fn block_comment(lex: &mut Lexer<RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

fn raw_string(lex: &mut Lexer<RawToken>) -> bool {
    match lex.remainder().find('`') {
        Some(end) => {
            lex.bump(end + 1);
            true
        }
        None => false,
    }
}

/// Split Go source into tokens.
///
/// Whitespace is not returned; instead every token records how many line
/// breaks precede it and whether it was separated from its predecessor by
/// spaces.
pub fn tokenize(src: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut column = 1;
    let mut newlines = 0;
    let mut space = false;

    let mut lexer = RawToken::lexer(src);
    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let Ok(raw) = raw else {
            return Err(SyntaxError::new(
                line,
                column,
                span.start,
                lex_error_message(&src[span.start..]),
            ));
        };
        let text = lexer.slice();

        match raw {
            RawToken::Newline => {
                newlines += 1;
                space = false;
                line += 1;
                column = 1;
                continue;
            }
            RawToken::Whitespace => {
                space = true;
                column += text.chars().count();
                continue;
            }
            _ => {}
        }

        tokens.push(Token {
            kind: classify(raw, text),
            text: text.to_string(),
            line,
            column,
            offset: span.start,
            newlines_before: newlines,
            space_before: space,
        });
        newlines = 0;
        space = false;

        for ch in text.chars() {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
    }

    Ok(tokens)
}

fn classify(raw: RawToken, text: &str) -> TokenKind {
    match raw {
        RawToken::Ident if is_keyword(text) => TokenKind::Keyword,
        RawToken::Ident => TokenKind::Ident,
        RawToken::Number => TokenKind::Number,
        RawToken::Rune => TokenKind::Rune,
        RawToken::String => TokenKind::String,
        RawToken::RawString => TokenKind::RawString,
        RawToken::LineComment => TokenKind::LineComment,
        RawToken::BlockComment => TokenKind::BlockComment,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Operator => TokenKind::Operator,
        // Layout tokens never reach classification.
        RawToken::Newline | RawToken::Whitespace => TokenKind::Operator,
    }
}

fn lex_error_message(rest: &str) -> String {
    if rest.starts_with("/*") {
        "comment not terminated".to_string()
    } else if rest.starts_with('"') {
        "string literal not terminated".to_string()
    } else if rest.starts_with('`') {
        "raw string literal not terminated".to_string()
    } else if rest.starts_with('\'') {
        "rune literal not terminated".to_string()
    } else {
        match rest.chars().next() {
            Some(ch) => format!("invalid character U+{:04X} '{}'", ch as u32, ch),
            None => "unexpected end of input".to_string(),
        }
    }
}
