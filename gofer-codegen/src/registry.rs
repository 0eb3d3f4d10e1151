//! Per-file package registry and alias allocation.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    config::AliasPolicy,
    package::{ExternalPackage, Package, is_placeholder},
    stdlib::StandardLibrary,
};

/// The packages known to one output file.
///
/// Every import path is registered at most once and every non-placeholder
/// alias is used by at most one package. Registration order is preserved.
///
/// # Example
///
/// ```
/// use gofer_codegen::{Package, PackageRegistry, StandardLibrary};
///
/// let mut registry = PackageRegistry::new(StandardLibrary::empty());
/// assert_eq!(registry.register(&Package::new("example.com/a/x")), "x");
/// assert_eq!(registry.register(&Package::new("example.com/b/x")), "x1");
/// assert_eq!(registry.register(&Package::new("example.com/a/x")), "x");
/// ```
#[derive(Debug, Clone)]
pub struct PackageRegistry {
    stdlib: StandardLibrary,
    policy: AliasPolicy,
    packages: IndexMap<String, ExternalPackage>,
    used: HashSet<String>,
}

impl PackageRegistry {
    pub fn new(stdlib: StandardLibrary) -> Self {
        Self::with_policy(stdlib, AliasPolicy::default())
    }

    pub fn with_policy(stdlib: StandardLibrary, policy: AliasPolicy) -> Self {
        Self {
            stdlib,
            policy,
            packages: IndexMap::new(),
            used: HashSet::new(),
        }
    }

    /// Register `package` and return the alias it is known by in this file.
    ///
    /// Registering a known path again returns the existing alias, whatever
    /// alias is requested this time.
    pub fn register(&mut self, package: &Package) -> &str {
        if let Some(index) = self.packages.get_index_of(package.path()) {
            return &self.packages[index].alias;
        }

        let candidate = package.candidate_alias();
        let alias = if is_placeholder(&candidate) {
            candidate
        } else {
            let alias = match (self.policy, package.requested_alias()) {
                (AliasPolicy::Authoritative, Some(_)) => candidate,
                _ => self.unused_alias(candidate),
            };
            self.used.insert(alias.clone());
            alias
        };

        let standard = self.stdlib.is_standard(package.path());
        tracing::debug!(path = package.path(), alias = %alias, standard, "registered package");

        let entry = self
            .packages
            .entry(package.path().to_string())
            .or_insert(ExternalPackage {
                path: package.path().to_string(),
                alias,
                standard,
            });
        &entry.alias
    }

    fn unused_alias(&self, candidate: String) -> String {
        if !self.used.contains(&candidate) {
            return candidate;
        }

        let mut suffix = 1;
        loop {
            let alias = format!("{candidate}{suffix}");
            if !self.used.contains(&alias) {
                tracing::debug!(candidate = %candidate, alias = %alias, "alias taken, suffixed");
                return alias;
            }
            suffix += 1;
        }
    }

    pub fn get(&self, path: &str) -> Option<&ExternalPackage> {
        self.packages.get(path)
    }

    /// Whether `alias` is reserved by a registered package.
    pub fn is_used(&self, alias: &str) -> bool {
        self.used.contains(alias)
    }

    /// Packages in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ExternalPackage> {
        self.packages.values()
    }

    /// Packages in import order: standard library first, then by path.
    pub fn sorted(&self) -> Vec<&ExternalPackage> {
        let mut packages: Vec<_> = self.packages.values().collect();
        packages.sort_by(|a, b| {
            b.standard
                .cmp(&a.standard)
                .then_with(|| a.path.cmp(&b.path))
        });
        packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn stdlib(&self) -> &StandardLibrary {
        &self.stdlib
    }
}
