//! Package descriptors and alias derivation.

/// The blank placeholder alias, used for side-effect-only imports.
pub const BLANK: &str = "_";

/// The dot placeholder alias, which merges the package's exported names
/// into the importing file's scope.
pub const DOT: &str = ".";

/// Whether `alias` is one of the placeholders exempt from uniqueness.
pub fn is_placeholder(alias: &str) -> bool {
    alias == BLANK || alias == DOT
}

/// A reference to a Go package: an import path plus an optional requested
/// alias.
///
/// This is what callers hold. The alias actually used in a file is decided
/// by that file's [`PackageRegistry`](crate::PackageRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    path: String,
    alias: Option<String>,
}

impl Package {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
        }
    }

    /// Request an explicit alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Import only for side effects (`_ "path"`).
    pub fn blank(path: impl Into<String>) -> Self {
        Self::new(path).alias(BLANK)
    }

    /// Dot import (`. "path"`).
    pub fn dot(path: impl Into<String>) -> Self {
        Self::new(path).alias(DOT)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn requested_alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The requested alias, or the one derived from the path.
    pub fn candidate_alias(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => default_alias(&self.path),
        }
    }
}

impl From<&str> for Package {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Package {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// The last segment of an import path.
pub fn base(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    match path.rfind('/') {
        Some(slash) => &path[slash + 1..],
        None => path,
    }
}

/// Derive the alias Go tooling would suggest for `path`.
///
/// The last path segment is used, keeping only the part after its last `-`
/// or `_` (`github.com/redis/go-redis` gives `redis`).
pub fn default_alias(path: &str) -> String {
    let segment = base(path);
    let trimmed = match segment.rfind(['-', '_']) {
        Some(at) => &segment[at + 1..],
        None => segment,
    };
    if trimmed.is_empty() {
        segment.to_string()
    } else {
        trimmed.to_string()
    }
}

/// A package registered in one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPackage {
    pub(crate) path: String,
    pub(crate) alias: String,
    pub(crate) standard: bool,
}

impl ExternalPackage {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Whether the package belongs to the Go standard library.
    pub fn is_standard(&self) -> bool {
        self.standard
    }

    /// Whether the import declaration needs to spell out the alias.
    pub fn needs_explicit_alias(&self) -> bool {
        self.alias != base(&self.path)
    }
}
