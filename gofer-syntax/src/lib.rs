//! Minimal Go syntax support for code generators.
//!
//! This crate understands just enough of Go to manage import declarations in
//! generated files and reprint them in a stable, canonical layout:
//!
//! - [`lexer`] - logos-based tokenizer that records layout on each token
//! - [`parser`] - package clause, imports and top-level declaration extents
//! - [`source`] - the parsed file model and import declaration builders
//! - [`printer`] - canonical reprinting with a fixed [`Style`]

pub mod error;
pub mod indent;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod source;
pub mod token;

pub use error::SyntaxError;
pub use indent::Indent;
pub use lexer::tokenize;
pub use parser::parse;
pub use printer::{Printer, Style};
pub use source::{Decl, DeclKind, ImportDecl, ImportSpec, PackageClause, SourceFile};
pub use token::{Token, TokenKind};

/// Parse `src` and reprint it with [`Style::GO`].
pub fn format_source(src: &str) -> Result<String, SyntaxError> {
    let file = parse(src)?;
    Ok(Printer::new(Style::GO).print(&file))
}
