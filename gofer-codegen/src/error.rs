use std::path::{Path, PathBuf};

use gofer_syntax::SyntaxError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for gofer-codegen operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{filename}: unparsable Go source: {message}\n{listing}")]
    #[diagnostic(code(gofer::syntax))]
    Syntax {
        filename: String,
        /// The generated text with 1-based line numbers.
        listing: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("{tool} is not available")]
    #[diagnostic(code(gofer::formatter_unavailable), help("{hint}"))]
    FormatterUnavailable { tool: String, hint: String },

    #[error("{tool} exited with {status}: {stderr}")]
    #[diagnostic(code(gofer::formatter_failed))]
    FormatterFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("failed to access '{path}'")]
    #[diagnostic(code(gofer::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration")]
    #[diagnostic(code(gofer::config))]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create a syntax error for generated text that does not parse.
    pub fn syntax(err: &SyntaxError, src: &str, filename: &str) -> Box<Self> {
        let offset = err.offset.min(src.len());
        Box::new(Error::Syntax {
            filename: filename.to_string(),
            listing: numbered_listing(src),
            src: NamedSource::new(filename, src.to_string()),
            span: SourceSpan::from(offset..offset),
            message: err.to_string(),
        })
    }

    /// Create an IO error for `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// Create a configuration error from a toml error with source context.
    pub fn config(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Config {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    pub fn formatter_unavailable(tool: impl Into<String>, hint: impl Into<String>) -> Box<Self> {
        Box::new(Error::FormatterUnavailable {
            tool: tool.into(),
            hint: hint.into(),
        })
    }

    /// Whether the harness may continue past this error with a warning.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::FormatterUnavailable { .. })
    }
}

/// Render `src` with a right-aligned, 1-based line number before every line.
pub fn numbered_listing(src: &str) -> String {
    let mut listing = String::with_capacity(src.len() + src.len() / 4);
    for (index, line) in src.lines().enumerate() {
        listing.push_str(&format!("{:5}\t{}\n", index + 1, line));
    }
    listing
}
