//! Generator configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Header written at the top of every generated Go file unless configured
/// otherwise.
pub const DEFAULT_HEADER: &str = "Code generated by gofer. DO NOT EDIT.";

/// How explicit aliases interact with collision resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AliasPolicy {
    /// Explicit and derived aliases are both suffixed on collision.
    #[default]
    Suffix,
    /// Explicit aliases are used exactly as given. Derived aliases are
    /// still suffixed around them.
    Authoritative,
}

/// Settings for the external formatting pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FormatterConfig {
    pub enabled: bool,
    pub command: String,
    pub args: Vec<String>,
    pub install_hint: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "goimports".to_string(),
            args: vec!["-w".to_string()],
            install_hint: "go install golang.org/x/tools/cmd/goimports@latest".to_string(),
        }
    }
}

/// Configuration for one generation run, usually loaded from `gofer.toml`.
///
/// ```
/// use gofer_codegen::{AliasPolicy, Config};
///
/// let config = Config::from_toml("alias-policy = \"authoritative\"", "gofer.toml").unwrap();
/// assert_eq!(config.alias_policy, AliasPolicy::Authoritative);
/// assert!(config.formatter.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Overrides GOROOT detection for standard library classification.
    pub goroot: Option<PathBuf>,
    pub alias_policy: AliasPolicy,
    /// Comment written at the top of Go files. Empty or `None` disables it.
    pub header: Option<String>,
    pub formatter: FormatterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            goroot: None,
            alias_policy: AliasPolicy::default(),
            header: Some(DEFAULT_HEADER.to_string()),
            formatter: FormatterConfig::default(),
        }
    }
}

impl Config {
    /// The header to write, if any.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref().filter(|header| !header.is_empty())
    }

    /// Parse configuration from TOML text. `filename` is only used in
    /// diagnostics.
    pub fn from_toml(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|source| Error::config(source, src, filename))
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        Self::from_toml(&src, &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("", "gofer.toml").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.header.as_deref(), Some(DEFAULT_HEADER));
        assert_eq!(config.formatter.command, "goimports");
        assert_eq!(config.formatter.args, vec!["-w"]);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            goroot = "/usr/local/go"
            alias-policy = "authoritative"
            header = "Generated."

            [formatter]
            enabled = false
            command = "gofmt"
            args = ["-s", "-w"]
            install-hint = "install Go"
            "#,
            "gofer.toml",
        )
        .unwrap();

        assert_eq!(config.goroot, Some(PathBuf::from("/usr/local/go")));
        assert_eq!(config.alias_policy, AliasPolicy::Authoritative);
        assert_eq!(config.header.as_deref(), Some("Generated."));
        assert!(!config.formatter.enabled);
        assert_eq!(config.formatter.command, "gofmt");
        assert_eq!(config.formatter.args, vec!["-s", "-w"]);
        assert_eq!(config.formatter.install_hint, "install Go");
    }

    #[test]
    fn test_partial_formatter_table() {
        let config = Config::from_toml("[formatter]\ncommand = \"gofumpt\"\n", "gofer.toml").unwrap();
        assert_eq!(config.formatter.command, "gofumpt");
        assert!(config.formatter.enabled);
        assert_eq!(config.formatter.args, vec!["-w"]);
    }

    #[test]
    fn test_empty_header_disables() {
        let config = Config::from_toml("header = \"\"\n", "gofer.toml").unwrap();
        assert_eq!(config.header(), None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_toml("alias = \"x\"\n", "gofer.toml").unwrap_err();
        assert!(matches!(*err, Error::Config { .. }));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let err = Config::from_toml("alias-policy = \"random\"\n", "gofer.toml").unwrap_err();
        assert!(matches!(*err, Error::Config { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/gofer.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
