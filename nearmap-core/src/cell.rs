//! Opaque spatial-grid cell identifiers.

use std::fmt;

/// A spatial-grid cell identifier at some resolution.
///
/// The string encodes both resolution and location, but this crate never
/// inspects it: cells are produced only by the grid-index collaborator and
/// compared with exact string equality. Records may carry cells keyed at a
/// finer granularity than a search resolution, which is why fine-tier store
/// lookups are prefix matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridCell(String);

impl GridCell {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GridCell {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GridCell {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for GridCell {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_and_string_agree() {
        let from_str: GridCell = "8928308280fffff".into();
        let from_string: GridCell = "8928308280fffff".to_string().into();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str, GridCell::new("8928308280fffff"));
    }

    #[test]
    fn test_equality_is_exact_string() {
        let a = GridCell::new("8928308280fffff");
        let b = GridCell::new("8928308280fffff");
        let c = GridCell::new("8928308280FFFFF");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
