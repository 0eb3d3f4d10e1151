//! Import-aware Go source generation.
//!
//! Generators write raw text and qualified identifiers into a
//! [`GeneratedFile`]. Every file tracks the packages it references in its own
//! [`PackageRegistry`], which hands out collision-free aliases. When the run
//! ends, each Go file is parsed, gets a sorted import declaration and is
//! reprinted canonically.
//!
//! # Module Organization
//!
//! - [`package`] - package descriptors and alias derivation
//! - [`registry`] - per-file alias allocation
//! - [`stdlib`] - standard library classification
//! - [`file`] - the text buffer generators write into
//! - [`synthesize`] - import insertion and reformatting
//! - [`output`] / [`formatter`] - persistence and the external formatting pass
//! - [`plugin`] - the harness tying a run together

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod file;
pub mod formatter;
pub mod ident;
pub mod output;
pub mod package;
pub mod plugin;
pub mod registry;
pub mod stdlib;
pub mod synthesize;

pub use config::{AliasPolicy, Config, DEFAULT_HEADER, FormatterConfig};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{Error, Result};
pub use file::GeneratedFile;
pub use formatter::{CommandFormatter, ExternalFormatter};
pub use ident::{Fragment, GoIdent};
pub use output::{FsWriter, OutputWriter};
pub use package::{ExternalPackage, Package};
pub use plugin::{Plugin, RunSummary, run};
pub use registry::PackageRegistry;
pub use stdlib::StandardLibrary;
pub use synthesize::finalize;
