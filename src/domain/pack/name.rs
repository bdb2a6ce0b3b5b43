//! Pack name value object.
//!
//! A pack name is its identity. Names are matched case-insensitively: the
//! storage key is the upper-cased name, while the name as first typed by the
//! creator is kept for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::foundation::ValidationError;

/// Validated pack name (`[A-Za-z0-9_-]+`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackName(String);

impl PackName {
    /// Parses a pack name, rejecting anything outside `[A-Za-z0-9_-]+`.
    ///
    /// No trimming happens here; callers decide what counts as the name.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("pack_name"));
        }
        if !raw.chars().all(is_name_char) {
            return Err(ValidationError::invalid_format(
                "pack_name",
                "only letters, numbers, hyphens and underscores are allowed",
            ));
        }
        Ok(Self(raw))
    }

    /// Returns true if `raw` would parse.
    pub fn is_valid(raw: &str) -> bool {
        !raw.is_empty() && raw.chars().all(is_name_char)
    }

    /// Name as typed by its creator.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical storage key.
    pub fn key(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl PartialEq for PackName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for PackName {}

impl Hash for PackName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl TryFrom<String> for PackName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PackName> for String {
    fn from(name: PackName) -> Self {
        name.0
    }
}

impl fmt::Display for PackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
