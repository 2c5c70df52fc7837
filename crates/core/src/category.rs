//! Category entity

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, Permissions, TopicId};

/// A hierarchical container for topics
///
/// Categories pre-exist in the forum; recat only mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Opaque identity
    pub id: CategoryId,
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hex colour without the leading `#`
    pub color: String,
    /// URL slug, unique among siblings
    pub slug: String,
    /// Parent category, if nested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CategoryId>,
    /// Group → access level
    #[serde(default)]
    pub permissions: Permissions,
    /// The category's own "About this category" topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_topic: Option<TopicId>,
    /// Topics in the category, excluding the definition topic
    #[serde(default)]
    pub topic_count: u64,
    /// Posts across the counted topics
    #[serde(default)]
    pub post_count: u64,
}

impl Category {
    /// Title given to a category's definition topic
    pub fn definition_title(&self) -> String {
        format!("About the {} category", self.name)
    }
}
