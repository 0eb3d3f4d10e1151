//! Minimal structural parser for Go files.
//!
//! The parser validates the package clause, parses import declarations and
//! finds the extent of every other top-level declaration by tracking bracket
//! nesting and Go's semicolon insertion rule. Declaration bodies are not
//! parsed further.

use crate::{
    error::SyntaxError,
    lexer::tokenize,
    source::{Decl, DeclKind, ImportDecl, ImportSpec, PackageClause, SourceFile, unquote},
    token::{Token, TokenKind},
};

/// Parse Go source text.
pub fn parse(src: &str) -> Result<SourceFile, SyntaxError> {
    let tokens = tokenize(src)?;

    let (package, decls) = {
        let mut parser = Parser::new(&tokens);
        let package = parser.package_clause()?;
        let mut decls = Vec::new();
        while let Some(decl) = parser.decl(&decls)? {
            decls.push(decl);
        }
        (package, decls)
    };

    Ok(SourceFile {
        tokens,
        package,
        decls,
    })
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Index of the next non-comment token, without consuming it.
    fn peek(&self) -> Option<usize> {
        (self.pos..self.tokens.len()).find(|&i| !self.tokens[i].is_comment())
    }

    /// Consume and return the index of the next non-comment token.
    fn bump(&mut self) -> Option<usize> {
        let index = self.peek()?;
        self.pos = index + 1;
        Some(index)
    }

    fn token(&self, index: usize) -> &'a Token {
        &self.tokens[index]
    }

    fn package_clause(&mut self) -> Result<PackageClause, SyntaxError> {
        let Some(keyword) = self.bump() else {
            return Err(self.eof_error("expected 'package', found 'EOF'"));
        };
        let keyword = self.token(keyword);
        if !keyword.is_keyword("package") {
            return Err(SyntaxError::at(
                keyword,
                format!("expected 'package', found {}", keyword.describe()),
            ));
        }

        let Some(name_index) = self.bump() else {
            return Err(self.eof_error("expected 'IDENT', found 'EOF'"));
        };
        let name = self.token(name_index);
        if name.kind != TokenKind::Ident {
            return Err(SyntaxError::at(
                name,
                format!("expected 'IDENT', found {}", name.describe()),
            ));
        }
        if name.text == "_" {
            return Err(SyntaxError::at(name, "invalid package name _"));
        }

        self.statement_end(name_index, None)?;
        Ok(PackageClause {
            name: name.text.clone(),
            name_index,
        })
    }

    fn decl(&mut self, seen: &[Decl]) -> Result<Option<Decl>, SyntaxError> {
        while let Some(index) = self.peek() {
            if self.token(index).kind != TokenKind::Semicolon {
                break;
            }
            self.pos = index + 1;
        }

        let Some(start) = self.bump() else {
            return Ok(None);
        };
        let token = self.token(start);

        let kind = match (token.kind, token.text.as_str()) {
            (TokenKind::Keyword, "import") => {
                if seen
                    .iter()
                    .any(|decl| !matches!(decl.kind, DeclKind::Import(_)))
                {
                    return Err(SyntaxError::at(
                        token,
                        "imports must appear before other declarations",
                    ));
                }
                DeclKind::Import(self.import_decl()?)
            }
            (TokenKind::Keyword, "const") => {
                self.skip_decl(start)?;
                DeclKind::Const
            }
            (TokenKind::Keyword, "var") => {
                self.skip_decl(start)?;
                DeclKind::Var
            }
            (TokenKind::Keyword, "type") => {
                self.skip_decl(start)?;
                DeclKind::Type
            }
            (TokenKind::Keyword, "func") => {
                self.skip_decl(start)?;
                DeclKind::Func
            }
            _ => {
                return Err(SyntaxError::at(
                    token,
                    format!("expected declaration, found {}", token.describe()),
                ));
            }
        };

        Ok(Some(Decl {
            kind,
            range: start..self.pos,
        }))
    }

    fn import_decl(&mut self) -> Result<ImportDecl, SyntaxError> {
        let Some(next) = self.peek() else {
            return Err(self.eof_error("expected 'STRING', found 'EOF'"));
        };

        if self.token(next).kind != TokenKind::LParen {
            let (spec, last) = self.import_spec()?;
            self.statement_end(last, None)?;
            return Ok(ImportDecl {
                specs: vec![spec],
                grouped: false,
            });
        }

        self.pos = next + 1;
        let mut specs = Vec::new();
        loop {
            let Some(index) = self.peek() else {
                return Err(self.eof_error("expected ')', found 'EOF'"));
            };
            match self.token(index).kind {
                TokenKind::Semicolon => {
                    self.pos = index + 1;
                }
                TokenKind::RParen => {
                    self.pos = index + 1;
                    self.statement_end(index, None)?;
                    return Ok(ImportDecl {
                        specs,
                        grouped: true,
                    });
                }
                _ => {
                    let (spec, last) = self.import_spec()?;
                    specs.push(spec);
                    self.statement_end(last, Some(TokenKind::RParen))?;
                }
            }
        }
    }

    /// Parse `[name] "path"`, returning the spec and the index of the path.
    fn import_spec(&mut self) -> Result<(ImportSpec, usize), SyntaxError> {
        let Some(mut index) = self.bump() else {
            return Err(self.eof_error("expected 'STRING', found 'EOF'"));
        };

        let mut name = None;
        if matches!(self.token(index).kind, TokenKind::Ident | TokenKind::Dot) {
            name = Some(self.token(index).text.clone());
            index = match self.bump() {
                Some(index) => index,
                None => return Err(self.eof_error("expected 'STRING', found 'EOF'")),
            };
        }

        let literal = self.token(index);
        if !matches!(literal.kind, TokenKind::String | TokenKind::RawString) {
            return Err(SyntaxError::at(
                literal,
                format!("expected import path, found {}", literal.describe()),
            ));
        }
        let path = unquote(&literal.text);
        if path.is_empty() {
            return Err(SyntaxError::at(literal, "invalid import path: \"\""));
        }

        Ok((ImportSpec { name, path }, index))
    }

    /// Skip a non-import declaration starting at `start`.
    fn skip_decl(&mut self, start: usize) -> Result<(), SyntaxError> {
        let mut open: Vec<usize> = Vec::new();
        let mut last = start;

        loop {
            let next = self.peek();
            if open.is_empty()
                && self.token(last).ends_statement()
                && self.line_break_between(last, next)
            {
                return Ok(());
            }

            let Some(index) = next else {
                let message = match open.last() {
                    Some(&opener) => format!(
                        "expected '{}', found 'EOF'",
                        self.token(opener).closer().unwrap_or_default()
                    ),
                    None => "expected operand, found 'EOF'".to_string(),
                };
                return Err(self.eof_error(message));
            };

            let token = self.token(index);
            if open.is_empty() && token.kind == TokenKind::Semicolon {
                self.pos = index + 1;
                return Ok(());
            }

            if token.is_open() {
                open.push(index);
            } else if token.is_close() {
                let Some(opener) = open.pop() else {
                    return Err(SyntaxError::at(
                        token,
                        format!("unexpected {}", token.describe()),
                    ));
                };
                let expected = self.token(opener).closer().unwrap_or_default();
                if expected != token.text {
                    return Err(SyntaxError::at(
                        token,
                        format!("expected '{}', found '{}'", expected, token.text),
                    ));
                }
            }

            self.pos = index + 1;
            last = index;
        }
    }

    /// Accept the end of a statement after `last`: a `;`, a line break, the
    /// end of input or (without consuming it) the `closer` token.
    fn statement_end(&mut self, last: usize, closer: Option<TokenKind>) -> Result<(), SyntaxError> {
        let next = self.peek();
        let Some(index) = next else {
            return Ok(());
        };

        let token = self.token(index);
        if token.kind == TokenKind::Semicolon {
            self.pos = index + 1;
            return Ok(());
        }
        if closer == Some(token.kind) || self.line_break_between(last, next) {
            return Ok(());
        }

        Err(SyntaxError::at(
            token,
            format!("expected ';', found {}", token.describe()),
        ))
    }

    /// Whether a line break separates token `last` from token `next`
    /// (`None` meaning the end of input, which always counts).
    fn line_break_between(&self, last: usize, next: Option<usize>) -> bool {
        let Some(next) = next else {
            return true;
        };

        let between = &self.tokens[last + 1..next];
        between.iter().any(|token| {
            token.newlines_before > 0
                || token.kind == TokenKind::LineComment
                || (token.kind == TokenKind::BlockComment && token.spans_lines())
        }) || self.token(next).newlines_before > 0
    }

    fn eof_error(&self, message: impl Into<String>) -> SyntaxError {
        let Some(last) = self.tokens.last() else {
            return SyntaxError::new(1, 1, 0, message);
        };

        let mut line = last.line;
        let mut column = last.column;
        for ch in last.text.chars() {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        SyntaxError::new(line, column, last.offset + last.text.len(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(file: &SourceFile) -> Vec<&DeclKind> {
        file.decls().iter().map(|decl| &decl.kind).collect()
    }

    #[test]
    fn test_package_only() {
        let file = parse("// header\npackage main\n").unwrap();
        assert_eq!(file.package_name(), "main");
        assert!(file.decls().is_empty());
    }

    #[test]
    fn test_decls() {
        let file = parse(
            "package demo\n\nconst A = 1\nvar (\n\tb = 2\n)\ntype T struct {\n\tx int\n}\nfunc (t T) M() int {\n\treturn t.x +\n\t\t1\n}\n",
        )
        .unwrap();
        assert_eq!(
            kinds(&file),
            vec![
                &DeclKind::Const,
                &DeclKind::Var,
                &DeclKind::Type,
                &DeclKind::Func
            ]
        );
    }

    #[test]
    fn test_semicolon_separated_decls() {
        let file = parse("package p; var a = 1; var b = 2").unwrap();
        assert_eq!(file.decls().len(), 2);
    }

    #[test]
    fn test_imports() {
        let file = parse(
            "package main\n\nimport \"fmt\"\nimport (\n\tpb \"example.com/proto\"\n\t_ \"embed\"\n\t. `example.com/dsl`\n)\n",
        )
        .unwrap();
        let imports: Vec<_> = file.imports().cloned().collect();
        assert_eq!(
            imports,
            vec![
                ImportSpec::new("fmt"),
                ImportSpec::named("pb", "example.com/proto"),
                ImportSpec::named("_", "embed"),
                ImportSpec::named(".", "example.com/dsl"),
            ]
        );
    }

    #[test]
    fn test_decl_ranges_skip_comments() {
        let file = parse("package main\n\n// Doc.\nfunc f() {}\n").unwrap();
        let decl = &file.decls()[0];
        assert_eq!(file.tokens()[decl.range.start].text, "func");
        assert_eq!(file.tokens()[decl.range.end - 1].text, "}");
    }

    #[test]
    fn test_missing_package() {
        let err = parse("func main() {}\n").unwrap_err();
        assert_eq!(err.message, "expected 'package', found 'func'");
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_blank_package_name() {
        let err = parse("package _\n").unwrap_err();
        assert_eq!(err.message, "invalid package name _");
    }

    #[test]
    fn test_statement_outside_function() {
        let err = parse("package main\n\nx := 1\n").unwrap_err();
        assert_eq!(err.message, "expected declaration, found IDENT x");
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_unbalanced_brace() {
        let err = parse("package main\n\nfunc main() {\n\tprintln(1)\n").unwrap_err();
        assert_eq!(err.message, "expected '}', found 'EOF'");
    }

    #[test]
    fn test_mismatched_bracket() {
        let err = parse("package main\n\nfunc main() {\n\tprintln(1}\n}\n").unwrap_err();
        assert_eq!(err.message, "expected ')', found '}'");
        assert_eq!((err.line, err.column), (4, 11));
    }

    #[test]
    fn test_import_after_decl() {
        let err = parse("package main\n\nvar x = 1\n\nimport \"fmt\"\n").unwrap_err();
        assert_eq!(err.message, "imports must appear before other declarations");
    }

    #[test]
    fn test_import_without_path() {
        let err = parse("package main\n\nimport fmt\n\nfunc main() {}\n").unwrap_err();
        assert_eq!(err.message, "expected import path, found 'func'");
        assert_eq!(err.line, 5);
    }

    #[test]
    fn test_two_specs_on_one_line() {
        let err = parse("package main\n\nimport (\n\t\"fmt\" \"os\"\n)\n").unwrap_err();
        assert_eq!(err.message, "expected ';', found literal \"os\"");
    }

    #[test]
    fn test_newline_before_brace_ends_decl() {
        let err = parse("package main\n\nfunc main()\n{\n}\n").unwrap_err();
        assert_eq!(err.message, "expected declaration, found '{'");
    }
}
