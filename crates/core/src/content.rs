//! Topics, posts, tags and permalinks

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, PostId, TagId, TopicId};

/// A discussion thread owned by exactly one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Opaque identity
    pub id: TopicId,
    /// Topic title
    pub title: String,
    /// URL slug
    pub slug: String,
    /// Owning category
    pub category_id: CategoryId,
    /// Attached tags
    #[serde(default)]
    pub tags: Vec<TagId>,
    /// Number of times the topic was bumped to the top of listings
    #[serde(default)]
    pub bump_count: u64,
}

/// A previous body of a post, kept when an edit creates a revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRevision {
    /// Post version the body belonged to
    pub version: u32,
    /// The body before the edit
    pub raw: String,
}

/// A single message inside a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque identity
    pub id: PostId,
    /// Owning topic
    pub topic_id: TopicId,
    /// Position inside the topic, starting at 1
    pub post_number: u32,
    /// Raw body as typed by the author
    pub raw: String,
    /// Visible version number, starting at 1
    #[serde(default = "first_version")]
    pub version: u32,
    /// Revision history, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revisions: Vec<PostRevision>,
}

fn first_version() -> u32 {
    1
}

/// A topic label, many-to-many with topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Opaque identity
    pub id: TagId,
    /// Unique name
    pub name: String,
}

/// A URL-level redirect rule pointing an old path at a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permalink {
    /// Path being redirected, e.g. `/c/support/3`
    pub url: String,
    /// Redirect target
    pub category_id: CategoryId,
}

/// Restricts a category topic listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFilter {
    /// Leave out the category's definition topic
    pub exclude_definition: bool,
    /// Only topics carrying this tag name
    pub with_tag: Option<String>,
}

impl TopicFilter {
    /// Every topic in the category
    pub fn all() -> Self {
        Self::default()
    }

    /// Every topic except the definition topic
    pub fn movable() -> Self {
        Self {
            exclude_definition: true,
            with_tag: None,
        }
    }

    /// Restrict to topics carrying `tag`
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.with_tag = Some(tag.into());
        self
    }
}

/// Flags for a content edit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevisionOptions {
    /// Do not bump the topic to the top of listings
    pub bypass_bump: bool,
    /// Do not record a visible revision
    pub skip_revision: bool,
}

impl RevisionOptions {
    /// A mechanical migration edit: no bump, no revision
    pub fn silent() -> Self {
        Self {
            bypass_bump: true,
            skip_revision: true,
        }
    }
}

/// A post selected by a content scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPost {
    /// Post identity
    pub id: PostId,
    /// Canonical URL, for operator output
    pub url: String,
    /// Current raw body
    pub raw: String,
}
