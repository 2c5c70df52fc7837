//! The repository seam
//!
//! This module defines the [`Repository`] trait: every read and write recat
//! performs against the forum goes through it, so the rearrangement logic
//! never depends on a particular store.

use crate::category::Category;
use crate::content::{MatchedPost, Permalink, RevisionOptions, Tag, TopicFilter};
use crate::error::Result;
use crate::matcher::PostMatcher;
use crate::slug::SlugPath;
use crate::types::{Actor, CategoryId, Permissions, PostId, TagId, TopicId, Viewer};

/// Forum store abstraction
///
/// Each method is expected to be atomic at the level of one repository
/// write. Nothing spans calls: a sequence of writes is not a transaction.
///
/// Thread safety: implementations use interior mutability and must be
/// `Send + Sync`.
pub trait Repository: Send + Sync {
    // ==================== Categories ====================

    /// All categories, in id order
    fn categories(&self) -> Result<Vec<Category>>;

    /// One category
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound` if the id is unknown.
    fn category(&self, id: CategoryId) -> Result<Category>;

    /// Persist name, description, colour, slug and parent of `category`
    ///
    /// Permissions and statistics are not touched; see
    /// [`set_permissions`](Self::set_permissions) and
    /// [`update_category_stats`](Self::update_category_stats).
    fn save_category(&self, category: &Category) -> Result<()>;

    /// Slugs from the root ancestor down to `id`
    fn slug_path(&self, id: CategoryId) -> Result<SlugPath>;

    /// Canonical URL path of a category, e.g. `/c/support/faq/12`
    fn category_url(&self, id: CategoryId) -> Result<String>;

    /// Replace a category's permission set
    fn set_permissions(&self, id: CategoryId, permissions: Permissions) -> Result<()>;

    /// Whether `viewer` can see the category
    fn can_see_category(&self, viewer: Viewer, id: CategoryId) -> Result<bool>;

    /// Retitle the category's definition topic after its current name
    fn rename_category_definition(&self, id: CategoryId) -> Result<()>;

    /// Recompute topic and post counts for every category
    fn update_category_stats(&self) -> Result<()>;

    /// Register a URL redirect rule; an identical existing rule is a no-op
    fn create_permalink(&self, permalink: Permalink) -> Result<()>;

    // ==================== Topics & tags ====================

    /// Ids of topics in a category, in id order
    fn topics_in_category(&self, id: CategoryId, filter: &TopicFilter) -> Result<Vec<TopicId>>;

    /// Reassign `topics` to `target` in one bulk update; returns the count moved
    fn move_topics(&self, topics: &[TopicId], target: CategoryId) -> Result<usize>;

    /// Look a tag up by name
    fn find_tag(&self, name: &str) -> Result<Option<Tag>>;

    /// Attach tags by name
    ///
    /// With `append` the topic keeps its current tags; otherwise they are
    /// replaced. Tags already attached are skipped. Missing tags are created
    /// only when `actor` is privileged.
    ///
    /// Returns the number of tags newly attached.
    fn tag_topic(&self, topic: TopicId, names: &[String], actor: Actor, append: bool)
        -> Result<usize>;

    /// Detach a tag; returns whether it was attached
    fn remove_tag(&self, topic: TopicId, tag: TagId) -> Result<bool>;

    // ==================== Posts ====================

    /// Posts whose raw body matches `matcher`, in id order
    ///
    /// Cursor pagination: only posts with an id greater than `after` are
    /// returned, at most `limit` of them.
    fn posts_matching(
        &self,
        matcher: &PostMatcher,
        after: Option<PostId>,
        limit: usize,
    ) -> Result<Vec<MatchedPost>>;

    /// Replace a post's raw body
    fn revise_post(&self, id: PostId, raw: String, options: RevisionOptions) -> Result<()>;
}
