//! Error types for recat's repository layer
//!
//! This module defines the errors a [`Repository`](crate::Repository)
//! implementation may return. We use `thiserror` for automatic `Display`
//! and `Error` trait implementations.

use std::io;
use thiserror::Error;

use crate::types::{CategoryId, PostId, TopicId};

/// Result type alias for repository operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the forum repository
#[derive(Debug, Error)]
pub enum Error {
    /// Category does not exist
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Topic does not exist
    #[error("Topic not found: {0}")]
    TopicNotFound(TopicId),

    /// Post does not exist
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    /// Tag does not exist
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// The acting principal may not perform the write
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Invalid input or entity state
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A search pattern could not be compiled
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error (dump files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True for the "entity no longer exists" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::CategoryNotFound(_)
                | Error::TopicNotFound(_)
                | Error::PostNotFound(_)
                | Error::TagNotFound(_)
        )
    }
}
