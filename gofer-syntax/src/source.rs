//! The structural view of a parsed Go file.
//!
//! Only the pieces needed for import management are modelled: the package
//! clause, import declarations and the token extent of every other top-level
//! declaration. The full token stream, comments included, is kept so the
//! printer can reproduce everything else verbatim.

use std::ops::Range;

use crate::token::{Token, TokenKind};

/// The `package <name>` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageClause {
    pub name: String,
    /// Index of the name token in [`SourceFile::tokens`].
    pub name_index: usize,
}

/// A single entry of an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// The local name, `_` or `.`; `None` when the package name is used.
    pub name: Option<String>,
    /// The unquoted import path.
    pub path: String,
}

impl ImportSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            name: None,
            path: path.into(),
        }
    }

    pub fn named(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
        }
    }
}

/// An `import` declaration, either `import "x"` or `import ( ... )`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportDecl {
    pub specs: Vec<ImportSpec>,
    /// Whether the specs are wrapped in parentheses.
    pub grouped: bool,
}

impl ImportDecl {
    /// Create a parenthesized import declaration.
    pub fn grouped(specs: impl IntoIterator<Item = ImportSpec>) -> Self {
        Self {
            specs: specs.into_iter().collect(),
            grouped: true,
        }
    }

    /// Lay the declaration out as tokens, one spec per line.
    ///
    /// The first token is preceded by a blank line.
    pub fn to_tokens(&self) -> Vec<Token> {
        let mut tokens = vec![Token::synthetic(TokenKind::Keyword, "import", 2)];
        let spec_break = usize::from(self.grouped);

        if self.grouped {
            tokens.push(Token::synthetic(TokenKind::LParen, "(", 0));
        }
        for spec in &self.specs {
            match &spec.name {
                Some(name) => {
                    let kind = if name == "." {
                        TokenKind::Dot
                    } else {
                        TokenKind::Ident
                    };
                    tokens.push(Token::synthetic(kind, name.as_str(), spec_break));
                    tokens.push(Token::synthetic(TokenKind::String, quote(&spec.path), 0));
                }
                None => {
                    tokens.push(Token::synthetic(
                        TokenKind::String,
                        quote(&spec.path),
                        spec_break,
                    ));
                }
            }
        }
        if self.grouped {
            let close_break = usize::from(!self.specs.is_empty());
            tokens.push(Token::synthetic(TokenKind::RParen, ")", close_break));
        }

        tokens
    }
}

/// Kind of a top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    Import(ImportDecl),
    Const,
    Var,
    Type,
    Func,
}

/// A top-level declaration and the tokens it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub kind: DeclKind,
    /// Token index range in [`SourceFile::tokens`], comments excluded at
    /// both ends.
    pub range: Range<usize>,
}

/// A parsed Go source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub(crate) tokens: Vec<Token>,
    pub(crate) package: PackageClause,
    pub(crate) decls: Vec<Decl>,
}

impl SourceFile {
    pub fn package_name(&self) -> &str {
        &self.package.name
    }

    pub fn package(&self) -> &PackageClause {
        &self.package
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    /// Every import spec in declaration order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.decls.iter().flat_map(|decl| match &decl.kind {
            DeclKind::Import(import) => import.specs.as_slice(),
            _ => &[][..],
        })
    }

    /// Token index just past the package clause and the comments that
    /// share its line.
    pub fn import_insertion_point(&self) -> usize {
        let mut at = self.package.name_index + 1;
        while let Some(token) = self.tokens.get(at) {
            if token.is_comment() && token.newlines_before == 0 {
                at += 1;
            } else {
                break;
            }
        }
        at
    }

    /// Insert `decl` as the first declaration of the file.
    ///
    /// A `;` ending the package clause on its line is dropped, since the
    /// declaration that followed it moves below the import block.
    pub fn insert_import_decl(&mut self, decl: ImportDecl) {
        self.drop_package_semicolon();
        let at = self.import_insertion_point();
        let tokens = decl.to_tokens();
        let len = tokens.len();

        if let Some(following) = self.tokens.get_mut(at) {
            following.newlines_before = following.newlines_before.max(2);
        }
        self.tokens.splice(at..at, tokens);

        for existing in &mut self.decls {
            if existing.range.start >= at {
                existing.range = existing.range.start + len..existing.range.end + len;
            }
        }
        self.decls.insert(
            0,
            Decl {
                kind: DeclKind::Import(decl),
                range: at..at + len,
            },
        );
    }

    fn drop_package_semicolon(&mut self) {
        let at = self.package.name_index + 1;
        let is_semicolon = self
            .tokens
            .get(at)
            .is_some_and(|token| token.kind == TokenKind::Semicolon && token.newlines_before == 0);
        if !is_semicolon {
            return;
        }

        self.tokens.remove(at);
        for decl in &mut self.decls {
            if decl.range.start > at {
                decl.range = decl.range.start - 1..decl.range.end - 1;
            }
        }
    }
}

/// Quote an import path as a Go interpreted string literal.
pub fn quote(path: &str) -> String {
    let mut quoted = String::with_capacity(path.len() + 2);
    quoted.push('"');
    for ch in path.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// Decode a Go string literal token (interpreted or raw) into its value.
pub fn unquote(literal: &str) -> String {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        return raw.replace('\r', "");
    }

    let inner = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(literal);
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some(other) => value.push(other),
            None => value.push('\\'),
        }
    }
    value
}
