//! Indentation configuration for the printer.

/// Indentation unit used for one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// A tab character (what gofmt emits).
    Tab,
}

impl Indent {
    /// Indentation used by Go tooling.
    pub const GO: Self = Self::Tab;

    /// Append `levels` indentation units to `out`.
    pub fn write(&self, out: &mut String, levels: usize) {
        match self {
            Self::Tab => out.extend(std::iter::repeat_n('\t', levels)),
            Self::Spaces(width) => {
                out.extend(std::iter::repeat_n(' ', levels * usize::from(*width)))
            }
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::GO
    }
}
