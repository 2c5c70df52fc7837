//! Slug paths and category reference strings
//!
//! A category's reference string (the hashtag users type to link to it) is
//! fully determined by its slug path:
//!
//! | Path | Reference |
//! |------|-----------|
//! | `["support"]` | `#support` |
//! | `["support", "faq"]` | `#support:faq` |
//! | `["a", "b", "c"]` | `#a:c` |
//!
//! Only the root and the category's own slug are combined; intermediate
//! ancestors never appear, matching the forum's two-level hashtag syntax.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Separator between root and child slug in a nested reference
pub const NESTED_SEPARATOR: char = ':';

/// Ordered slugs from a category's root ancestor down to itself
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SlugPath(Vec<String>);

impl SlugPath {
    /// Build a slug path, rejecting an empty one
    pub fn new(slugs: Vec<String>) -> Result<Self> {
        if slugs.is_empty() {
            return Err(Error::InvalidInput("slug path must not be empty".into()));
        }
        Ok(Self(slugs))
    }

    /// Slug of the root ancestor (the category itself for a root category)
    pub fn root(&self) -> &str {
        &self.0[0]
    }

    /// The category's own slug
    pub fn leaf(&self) -> &str {
        &self.0[self.0.len() - 1]
    }

    /// Number of levels, always >= 1
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Slugs root first
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The reference string for this path
    pub fn slug_tag(&self) -> SlugTag {
        SlugTag::from(self)
    }
}

impl TryFrom<Vec<String>> for SlugPath {
    type Error = Error;

    fn try_from(slugs: Vec<String>) -> Result<Self> {
        SlugPath::new(slugs)
    }
}

impl From<SlugPath> for Vec<String> {
    fn from(path: SlugPath) -> Self {
        path.0
    }
}

/// A category reference string such as `#support` or `#support:faq`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlugTag(String);

impl SlugTag {
    /// The reference text, including the leading `#`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the `#root:child` form
    pub fn is_nested(&self) -> bool {
        self.0.contains(NESTED_SEPARATOR)
    }
}

impl From<&SlugPath> for SlugTag {
    fn from(path: &SlugPath) -> Self {
        if path.len() == 1 {
            SlugTag(format!("#{}", path.root()))
        } else {
            SlugTag(format!("#{}{}{}", path.root(), NESTED_SEPARATOR, path.leaf()))
        }
    }
}

impl fmt::Display for SlugTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SlugTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
