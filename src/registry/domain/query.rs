//! Validated skill discovery query.

use super::RegistryDomainError;
use std::fmt;

/// Case-folded, non-empty discovery query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkillQuery(String);

impl SkillQuery {
    /// Creates a query from raw user input.
    ///
    /// The input is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyQuery`] when nothing remains after
    /// trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, RegistryDomainError> {
        let normalized = value.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(RegistryDomainError::EmptyQuery);
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
