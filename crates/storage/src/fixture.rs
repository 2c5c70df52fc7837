//! Fixture builder for tests and demos
//!
//! # Example
//!
//! ```
//! use recat_storage::ForumBuilder;
//!
//! let forum = ForumBuilder::new()
//!     .category(3, "support")
//!     .child_category(7, 3, "faq")
//!     .topic(100, 7, &["howto"])
//!     .post(1000, 100, "see #support:faq")
//!     .build();
//! ```
//!
//! Every category gets a definition topic with id
//! [`DEFINITION_TOPIC_BASE`] + category id.

use recat_core::{
    CategoryId, Category, Permissions, Post, PostId, Tag, TagId, Topic, TopicId,
};

use crate::dump::ForumDump;
use crate::memory::MemoryForum;

/// Offset for generated definition topic ids
pub const DEFINITION_TOPIC_BASE: u64 = 900_000;

/// Default colour given to fixture categories
pub const DEFAULT_COLOR: &str = "0088CC";

/// Builds a [`MemoryForum`] entity by entity
///
/// # Panics
///
/// Builder methods panic when they reference an entity that was not added
/// first; fixtures are expected to be written in dependency order.
#[derive(Debug, Default)]
pub struct ForumBuilder {
    dump: ForumDump,
}

impl ForumBuilder {
    /// Start an empty forum
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root category named after its slug, visible to everyone
    pub fn category(mut self, id: u64, slug: &str) -> Self {
        self.push_category(id, None, slug);
        self
    }

    /// Add a category nested under `parent`
    pub fn child_category(mut self, id: u64, parent: u64, slug: &str) -> Self {
        assert!(
            self.find_category(parent).is_some(),
            "parent category {} not added",
            parent
        );
        self.push_category(id, Some(CategoryId(parent)), slug);
        self
    }

    /// Set a category's colour
    pub fn color(mut self, id: u64, color: &str) -> Self {
        self.category_mut(id).color = color.to_string();
        self
    }

    /// Replace a category's permission set
    pub fn permissions(mut self, id: u64, permissions: Permissions) -> Self {
        self.category_mut(id).permissions = permissions;
        self
    }

    /// Add a tag without attaching it to anything
    pub fn tag(mut self, name: &str) -> Self {
        self.tag_id(name);
        self
    }

    /// Add a topic in `category` carrying `tags` (created on demand)
    pub fn topic(mut self, id: u64, category: u64, tags: &[&str]) -> Self {
        assert!(
            self.find_category(category).is_some(),
            "category {} not added",
            category
        );
        let tags = tags.iter().map(|name| self.tag_id(name)).collect();
        self.dump.topics.push(Topic {
            id: TopicId(id),
            title: format!("Topic {}", id),
            slug: format!("topic-{}", id),
            category_id: CategoryId(category),
            tags,
            bump_count: 0,
        });
        self
    }

    /// Add a post at the end of `topic`
    pub fn post(mut self, id: u64, topic: u64, raw: &str) -> Self {
        assert!(
            self.dump.topics.iter().any(|t| t.id == TopicId(topic)),
            "topic {} not added",
            topic
        );
        let post_number = self
            .dump
            .posts
            .iter()
            .filter(|p| p.topic_id == TopicId(topic))
            .count() as u32
            + 1;
        self.dump.posts.push(Post {
            id: PostId(id),
            topic_id: TopicId(topic),
            post_number,
            raw: raw.to_string(),
            version: 1,
            revisions: Vec::new(),
        });
        self
    }

    /// The dump built so far
    pub fn into_dump(self) -> ForumDump {
        self.dump
    }

    /// Finish into a repository
    pub fn build(self) -> MemoryForum {
        MemoryForum::from_dump(self.dump)
    }

    fn push_category(&mut self, id: u64, parent: Option<CategoryId>, slug: &str) {
        let definition = TopicId(DEFINITION_TOPIC_BASE + id);
        self.dump.categories.push(Category {
            id: CategoryId(id),
            name: slug.to_string(),
            description: None,
            color: DEFAULT_COLOR.to_string(),
            slug: slug.to_string(),
            parent,
            permissions: Permissions::everyone_full(),
            definition_topic: Some(definition),
            topic_count: 0,
            post_count: 0,
        });
        self.dump.topics.push(Topic {
            id: definition,
            title: format!("About the {} category", slug),
            slug: format!("about-the-{}-category", slug),
            category_id: CategoryId(id),
            tags: Vec::new(),
            bump_count: 0,
        });
    }

    fn find_category(&self, id: u64) -> Option<&Category> {
        self.dump.categories.iter().find(|c| c.id == CategoryId(id))
    }

    fn category_mut(&mut self, id: u64) -> &mut Category {
        self.dump
            .categories
            .iter_mut()
            .find(|c| c.id == CategoryId(id))
            .unwrap_or_else(|| panic!("category {} not added", id))
    }

    fn tag_id(&mut self, name: &str) -> TagId {
        if let Some(tag) = self.dump.tags.iter().find(|t| t.name == name) {
            return tag.id;
        }
        let id = TagId(self.dump.tags.len() as u64 + 1);
        self.dump.tags.push(Tag {
            id,
            name: name.to_string(),
        });
        id
    }
}
