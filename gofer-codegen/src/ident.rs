//! Qualified identifiers and writer fragments.

use crate::package::Package;

/// A member of a Go package, such as `fmt.Println`.
///
/// Holding one does not register the package. The alias is chosen when the
/// identifier is written into a [`GeneratedFile`](crate::GeneratedFile).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoIdent {
    pub package: Package,
    pub name: String,
}

impl GoIdent {
    pub fn new(package: impl Into<Package>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

/// One piece of a line passed to [`GeneratedFile::write`](crate::GeneratedFile::write).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Literal text, appended as is.
    Text(String),
    /// A qualified identifier, appended as `alias.name`.
    Ident(GoIdent),
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<char> for Fragment {
    fn from(ch: char) -> Self {
        Self::Text(ch.to_string())
    }
}

impl From<GoIdent> for Fragment {
    fn from(ident: GoIdent) -> Self {
        Self::Ident(ident)
    }
}

impl From<&GoIdent> for Fragment {
    fn from(ident: &GoIdent) -> Self {
        Self::Ident(ident.clone())
    }
}

/// Build a `Vec<Fragment>` from heterogeneous pieces.
///
/// ```
/// use gofer_codegen::{GoIdent, fragments};
///
/// let println = GoIdent::new("fmt", "Println");
/// let line = fragments!["\t", &println, "(\"hi\")"];
/// assert_eq!(line.len(), 3);
/// ```
#[macro_export]
macro_rules! fragments {
    ($($piece:expr),* $(,)?) => {
        vec![$($crate::Fragment::from($piece)),*]
    };
}
