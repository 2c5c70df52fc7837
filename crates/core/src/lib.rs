//! Core types and traits for recat
//!
//! This crate defines the foundational types used throughout the system:
//! - CategoryId, TopicId, PostId, TagId: entity identifiers
//! - Category, Topic, Post, Tag, Permalink: forum entities
//! - Permissions, Group, AccessLevel: category permission sets
//! - SlugPath, SlugTag: category reference strings
//! - PostMatcher: literal content pre-filter
//! - Repository: the store abstraction everything else is written against
//! - Error: repository error type

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod content;
pub mod error;
pub mod matcher;
pub mod slug;
pub mod traits;
pub mod types;

pub use category::Category;
pub use content::{
    MatchedPost, Permalink, Post, PostRevision, RevisionOptions, Tag, Topic, TopicFilter,
};
pub use error::{Error, Result};
pub use matcher::PostMatcher;
pub use slug::{SlugPath, SlugTag, NESTED_SEPARATOR};
pub use traits::Repository;
pub use types::{
    AccessLevel, Actor, CategoryId, Group, Permissions, PostId, TagId, TopicId, Viewer,
};
