//! Validated region names.
//!
//! A region name becomes a directory under the tiles root and part of the
//! cached dataset file name, so it is restricted to a conservative alphabet.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_REGION_NAME_LEN: usize = 64;

/// Reasons a region name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRegionName {
    /// The name is empty.
    #[error("region name must not be empty")]
    Empty,
    /// The name exceeds the length limit.
    #[error("region name '{name}' is longer than {max} characters")]
    TooLong {
        /// Rejected name.
        name: String,
        /// Maximum length.
        max: usize,
    },
    /// The name contains a character outside `[a-z0-9_-]`.
    #[error("region name '{name}' contains '{found}'; use lower-case letters, digits, '-' or '_'")]
    Character {
        /// Rejected name.
        name: String,
        /// First offending character.
        found: char,
    },
    /// The name starts with a separator.
    #[error("region name '{name}' must start with a letter or digit")]
    Leading {
        /// Rejected name.
        name: String,
    },
}

/// A region identifier safe to use as a path component.
///
/// # Examples
/// ```
/// use tilewright_pipeline::RegionName;
///
/// let name = RegionName::new("toronto-downtown")?;
/// assert_eq!(name.as_str(), "toronto-downtown");
/// assert!(RegionName::new("../etc").is_err());
/// # Ok::<(), tilewright_pipeline::InvalidRegionName>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionName(String);

impl RegionName {
    /// Validate `name`.
    ///
    /// # Errors
    /// Returns [`InvalidRegionName`] describing the first rule violated.
    pub fn new(name: &str) -> Result<Self, InvalidRegionName> {
        if name.is_empty() {
            return Err(InvalidRegionName::Empty);
        }
        if name.chars().count() > MAX_REGION_NAME_LEN {
            return Err(InvalidRegionName::TooLong {
                name: name.to_owned(),
                max: MAX_REGION_NAME_LEN,
            });
        }
        if let Some(found) = name.chars().find(|c| !is_allowed(*c)) {
            return Err(InvalidRegionName::Character {
                name: name.to_owned(),
                found,
            });
        }
        if name.starts_with(['-', '_']) {
            return Err(InvalidRegionName::Leading {
                name: name.to_owned(),
            });
        }
        Ok(Self(name.to_owned()))
    }

    /// The validated name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

const fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RegionName {
    type Error = InvalidRegionName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<RegionName> for String {
    fn from(name: RegionName) -> Self {
        name.0
    }
}
