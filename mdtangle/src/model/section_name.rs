//! Normalized section names.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

/// Name of the section every code file starts with.
pub const ROOT_SECTION: &str = "root";

/// Section name that is an alias for [`ROOT_SECTION`].
pub const DEFAULT_ALIAS: &str = "default";

/// The name of a section within a code file.
///
/// Either the literal `root` or a `#`-prefixed name such as `#greet`.
/// Construction always normalizes, so two names compare equal exactly when
/// they address the same section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SectionName(String);

impl SectionName {
    /// Normalizes a section name as written in an annotation or marker.
    ///
    /// `default` and the empty name map to `root`; anything else gains a `#`
    /// prefix if missing.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        let bare = name.strip_prefix('#').unwrap_or(name);
        if bare.is_empty() || bare == DEFAULT_ALIAS {
            return Self::root();
        }
        Self(format!("#{}", bare))
    }

    /// The root section.
    pub fn root() -> Self {
        Self(ROOT_SECTION.to_string())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the root section.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_SECTION
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SectionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixing() {
        assert_eq!(SectionName::new("greet").as_str(), "#greet");
        assert_eq!(SectionName::new("#greet").as_str(), "#greet");
        assert_eq!(SectionName::new("greet"), SectionName::new("#greet"));
    }

    #[test]
    fn test_default_alias() {
        assert!(SectionName::new("default").is_root());
        assert!(SectionName::new("#default").is_root());
        assert_eq!(SectionName::new("default"), SectionName::root());
    }

    #[test]
    fn test_root_spelled_out_is_a_regular_section() {
        let name = SectionName::new("root");
        assert!(!name.is_root());
        assert_eq!(name.as_str(), "#root");
    }

    #[test]
    fn test_display() {
        assert_eq!(SectionName::new("sum-body").to_string(), "#sum-body");
        assert_eq!(SectionName::root().to_string(), "root");
    }
}
