//! Shared fixtures for executor tests.

use std::sync::Arc;

use recat_core::{
    Actor, Category, CategoryId, Error as RepoError, MatchedPost, Permalink, Permissions,
    PostId, PostMatcher, Repository, Result as RepoResult, RevisionOptions, SlugPath, Tag, TagId,
    TopicFilter, TopicId, Viewer,
};
use recat_storage::{ForumBuilder, MemoryForum};

use crate::{Executor, RunContext};

/// Support forum used by most tests:
///
/// | id | slug | notes |
/// |----|------|-------|
/// | 3 | support | topics 100 (faq), 101 (faq, howto), 102 |
/// | 6 | docs | red, topic 200 (faq) |
/// | 7 | support/guides | child of 3, topic 300 |
/// | 9 | archive | admins only |
pub fn support_forum() -> Arc<MemoryForum> {
    Arc::new(
        ForumBuilder::new()
            .category(3, "support")
            .category(6, "docs")
            .color(6, "FF0000")
            .child_category(7, 3, "guides")
            .category(9, "archive")
            .permissions(9, Permissions::admins_only())
            .topic(100, 3, &["faq"])
            .topic(101, 3, &["faq", "howto"])
            .topic(102, 3, &[])
            .topic(200, 6, &["faq"])
            .topic(300, 7, &[])
            .post(1000, 100, "See #support for help")
            .post(1001, 101, "Check #support:guides first")
            .post(1002, 102, "Unrelated post")
            .post(1003, 200, "Docs live in #docs")
            .post(1004, 300, "Back to #support")
            .build(),
    )
}

/// An executor and a fresh run context over `forum`
pub fn executor_for(forum: &Arc<MemoryForum>) -> (Executor, RunContext) {
    let repo: Arc<dyn Repository> = forum.clone();
    (Executor::new(repo), RunContext::new())
}

/// Shorthand for category ids
pub fn cat(id: u64) -> CategoryId {
    CategoryId(id)
}

/// A forum where one topic disappears after it has been listed.
///
/// Listings still return the topic; tagging and untagging it fail with
/// `TopicNotFound`, as if it had been deleted concurrently.
pub struct VanishingTopic {
    /// The forum being wrapped
    pub inner: Arc<MemoryForum>,
    /// Topic that vanishes between listing and writing
    pub vanished: TopicId,
}

impl Repository for VanishingTopic {
    fn categories(&self) -> RepoResult<Vec<Category>> {
        self.inner.categories()
    }

    fn category(&self, id: CategoryId) -> RepoResult<Category> {
        self.inner.category(id)
    }

    fn save_category(&self, category: &Category) -> RepoResult<()> {
        self.inner.save_category(category)
    }

    fn slug_path(&self, id: CategoryId) -> RepoResult<SlugPath> {
        self.inner.slug_path(id)
    }

    fn category_url(&self, id: CategoryId) -> RepoResult<String> {
        self.inner.category_url(id)
    }

    fn set_permissions(&self, id: CategoryId, permissions: Permissions) -> RepoResult<()> {
        self.inner.set_permissions(id, permissions)
    }

    fn can_see_category(&self, viewer: Viewer, id: CategoryId) -> RepoResult<bool> {
        self.inner.can_see_category(viewer, id)
    }

    fn rename_category_definition(&self, id: CategoryId) -> RepoResult<()> {
        self.inner.rename_category_definition(id)
    }

    fn update_category_stats(&self) -> RepoResult<()> {
        self.inner.update_category_stats()
    }

    fn create_permalink(&self, permalink: Permalink) -> RepoResult<()> {
        self.inner.create_permalink(permalink)
    }

    fn topics_in_category(&self, id: CategoryId, filter: &TopicFilter) -> RepoResult<Vec<TopicId>> {
        self.inner.topics_in_category(id, filter)
    }

    fn move_topics(&self, topics: &[TopicId], target: CategoryId) -> RepoResult<usize> {
        self.inner.move_topics(topics, target)
    }

    fn find_tag(&self, name: &str) -> RepoResult<Option<Tag>> {
        self.inner.find_tag(name)
    }

    fn tag_topic(
        &self,
        topic: TopicId,
        names: &[String],
        actor: Actor,
        append: bool,
    ) -> RepoResult<usize> {
        if topic == self.vanished {
            return Err(RepoError::TopicNotFound(topic));
        }
        self.inner.tag_topic(topic, names, actor, append)
    }

    fn remove_tag(&self, topic: TopicId, tag: TagId) -> RepoResult<bool> {
        if topic == self.vanished {
            return Err(RepoError::TopicNotFound(topic));
        }
        self.inner.remove_tag(topic, tag)
    }

    fn posts_matching(
        &self,
        matcher: &PostMatcher,
        after: Option<PostId>,
        limit: usize,
    ) -> RepoResult<Vec<MatchedPost>> {
        self.inner.posts_matching(matcher, after, limit)
    }

    fn revise_post(&self, id: PostId, raw: String, options: RevisionOptions) -> RepoResult<()> {
        self.inner.revise_post(id, raw, options)
    }
}
