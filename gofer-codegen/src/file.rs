//! Accumulation of generated source text.

use std::path::{Path, PathBuf};

use crate::{
    error::Result,
    ident::{Fragment, GoIdent},
    package::{DOT, Package},
    registry::PackageRegistry,
    synthesize,
};

/// One output file under construction.
pub struct GeneratedFile {
    filename: String,
    directory: PathBuf,
    buffer: String,
    registry: PackageRegistry,
}

impl GeneratedFile {
    pub fn new(
        filename: impl Into<String>,
        directory: impl Into<PathBuf>,
        registry: PackageRegistry,
    ) -> Self {
        Self {
            filename: filename.into(),
            directory: directory.into(),
            buffer: String::new(),
            registry,
        }
    }

    /// Append one line built from `fragments`.
    ///
    /// Identifiers are written as `alias.name`, registering their package
    /// on first use.
    pub fn write<I>(&mut self, fragments: I)
    where
        I: IntoIterator,
        I::Item: Into<Fragment>,
    {
        for fragment in fragments {
            match fragment.into() {
                Fragment::Text(text) => self.buffer.push_str(&text),
                Fragment::Ident(ident) => {
                    let qualified = self.qualify(&ident);
                    self.buffer.push_str(&qualified);
                }
            }
        }
        self.buffer.push('\n');
    }

    pub fn newline(&mut self) {
        self.buffer.push('\n');
    }

    /// Register packages up front, before any identifier references them.
    pub fn import<'a, I>(&mut self, packages: I)
    where
        I: IntoIterator<Item = &'a Package>,
    {
        for package in packages {
            self.registry.register(package);
        }
    }

    /// Resolve `ident` to the text it is written as in this file.
    pub fn qualify(&mut self, ident: &GoIdent) -> String {
        let alias = self.registry.register(&ident.package);
        if alias == DOT {
            ident.name.clone()
        } else {
            format!("{alias}.{}", ident.name)
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The raw accumulated text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    /// Whether the file gets import synthesis and reformatting.
    pub fn is_go_source(&self) -> bool {
        self.filename.ends_with(".go")
    }

    /// The final bytes of the file. See [`synthesize::finalize`].
    pub fn content(&self) -> Result<Vec<u8>> {
        synthesize::finalize(self)
    }
}
