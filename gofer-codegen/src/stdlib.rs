//! Standard library classification.

use std::{
    collections::BTreeSet,
    env,
    path::{Path, PathBuf},
    process::Command,
    sync::Arc,
};

/// Answers whether an import path belongs to the Go standard distribution.
///
/// The set of top-level names is computed once and shared between clones.
#[derive(Debug, Clone, Default)]
pub struct StandardLibrary {
    roots: Arc<BTreeSet<String>>,
}

impl StandardLibrary {
    /// A classifier for which nothing is standard.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a known list of top-level package names.
    pub fn from_roots<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roots: Arc::new(roots.into_iter().map(Into::into).collect()),
        }
    }

    /// List the directories under `goroot/src`.
    ///
    /// An unreadable listing degrades to an empty classifier.
    pub fn from_goroot(goroot: &Path) -> Self {
        let src = goroot.join("src");
        let entries = match std::fs::read_dir(&src) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(
                    path = %src.display(),
                    error = %err,
                    "cannot list standard library, treating every package as external"
                );
                return Self::empty();
            }
        };

        let roots: BTreeSet<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|ty| ty.is_dir()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        tracing::debug!(path = %src.display(), roots = roots.len(), "loaded standard library");

        Self {
            roots: Arc::new(roots),
        }
    }

    /// Locate GOROOT and list it.
    ///
    /// `goroot` wins when given, then the `GOROOT` environment variable, then
    /// `go env GOROOT`.
    pub fn detect(goroot: Option<&Path>) -> Self {
        match goroot.map(Path::to_path_buf).or_else(locate_goroot) {
            Some(goroot) => Self::from_goroot(&goroot),
            None => {
                tracing::warn!("GOROOT not found, treating every package as external");
                Self::empty()
            }
        }
    }

    /// Whether `path` is a standard library package.
    pub fn is_standard(&self, path: &str) -> bool {
        let root = path.split('/').next().unwrap_or(path);
        self.roots.contains(root)
    }

    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.roots.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn locate_goroot() -> Option<PathBuf> {
    if let Some(goroot) = env::var_os("GOROOT").filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(goroot));
    }

    let output = Command::new("go").args(["env", "GOROOT"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let goroot = String::from_utf8(output.stdout).ok()?;
    let goroot = goroot.trim();
    (!goroot.is_empty()).then(|| PathBuf::from(goroot))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_is_standard() {
        let std = StandardLibrary::from_roots(["fmt", "net", "encoding"]);
        assert!(std.is_standard("fmt"));
        assert!(std.is_standard("net/http"));
        assert!(std.is_standard("encoding/json"));
        assert!(!std.is_standard("example.com/net"));
        assert!(!std.is_standard("fmtx"));
        assert!(!std.is_standard("github.com/x/y"));
    }

    #[test]
    fn test_empty_classifier() {
        let std = StandardLibrary::empty();
        assert!(std.is_empty());
        assert!(!std.is_standard("fmt"));
    }

    #[test]
    fn test_from_goroot_lists_directories() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(src.join("fmt")).unwrap();
        std::fs::create_dir_all(src.join("net/http")).unwrap();
        std::fs::write(src.join("README.vendor"), "").unwrap();

        let std = StandardLibrary::from_goroot(dir.path());
        assert_eq!(std.roots().collect::<Vec<_>>(), vec!["fmt", "net"]);
        assert!(std.is_standard("net/http"));
    }

    #[test]
    fn test_missing_goroot_degrades() {
        let dir = TempDir::new().unwrap();
        let std = StandardLibrary::from_goroot(&dir.path().join("missing"));
        assert!(std.is_empty());
    }

    #[test]
    fn test_detect_prefers_override() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("src/strings")).unwrap();

        let std = StandardLibrary::detect(Some(dir.path()));
        assert!(std.is_standard("strings"));
    }

    #[test]
    fn test_clones_share_roots() {
        let std = StandardLibrary::from_roots(["fmt"]);
        let clone = std.clone();
        assert!(Arc::ptr_eq(&std.roots, &clone.roots));
    }
}
