//! Core types for recat
//!
//! This module defines the foundational types:
//! - CategoryId, TopicId, PostId, TagId: opaque entity identifiers
//! - Group / AccessLevel / Permissions: category permission sets
//! - Viewer: whose eyes a visibility check is evaluated with
//! - Actor: who performs a privileged repository write

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Get the raw numeric id
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a category
    CategoryId
);
entity_id!(
    /// Identifier of a topic
    TopicId
);
entity_id!(
    /// Identifier of a post
    PostId
);
entity_id!(
    /// Identifier of a tag
    TagId
);

/// A principal group that permissions are granted to
///
/// Serialized as its plain name so it can key a permission map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Group {
    /// Every viewer, including anonymous ones
    Everyone,
    /// Site administrators
    Admins,
    /// Moderators and administrators
    Staff,
    /// A named custom group
    Named(String),
}

impl From<String> for Group {
    fn from(name: String) -> Self {
        match name.as_str() {
            "everyone" => Group::Everyone,
            "admins" => Group::Admins,
            "staff" => Group::Staff,
            _ => Group::Named(name),
        }
    }
}

impl From<Group> for String {
    fn from(group: Group) -> Self {
        group.to_string()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Everyone => write!(f, "everyone"),
            Group::Admins => write!(f, "admins"),
            Group::Staff => write!(f, "staff"),
            Group::Named(name) => write!(f, "{}", name),
        }
    }
}

/// How much a group may do inside a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// See, reply and create topics
    Full,
    /// See and reply
    CreatePost,
    /// See only
    Readonly,
}

/// A category's permission set: group → access level
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(BTreeMap<Group, AccessLevel>);

impl Permissions {
    /// An empty permission set
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Full access for everyone; the forum's default for a public category
    pub fn everyone_full() -> Self {
        Self::new().grant(Group::Everyone, AccessLevel::Full)
    }

    /// Full access for administrators and nobody else
    pub fn admins_only() -> Self {
        Self::new().grant(Group::Admins, AccessLevel::Full)
    }

    /// Read-only for everyone, full access for administrators
    pub fn public_readonly() -> Self {
        Self::new()
            .grant(Group::Everyone, AccessLevel::Readonly)
            .grant(Group::Admins, AccessLevel::Full)
    }

    /// Builder-style grant; replaces any existing level for `group`
    pub fn grant(mut self, group: Group, level: AccessLevel) -> Self {
        self.0.insert(group, level);
        self
    }

    /// Access level for `group`, if any
    pub fn level(&self, group: &Group) -> Option<AccessLevel> {
        self.0.get(group).copied()
    }

    /// Iterate over (group, level) pairs in group order
    pub fn iter(&self) -> impl Iterator<Item = (&Group, &AccessLevel)> {
        self.0.iter()
    }

    /// True if no group has any access
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(group, level)| format!("{}={:?}", group, level))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// The viewer a visibility check is evaluated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// Not logged in
    Anonymous,
    /// Site administrator
    Admin,
}

/// The principal performing a privileged write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The forum's built-in system user
    System,
    /// An unauthenticated caller
    Anonymous,
}
