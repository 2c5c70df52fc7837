//! MemoryForum: in-memory forum repository
//!
//! This module implements the [`Repository`] trait using:
//! - `BTreeMap`s keyed by entity id, so listings come back in id order
//! - a single `parking_lot::RwLock` around the whole state, so every trait
//!   method is atomic with respect to the others
//!
//! # Design Notes
//!
//! - **Derived values are computed on read**: slug paths, URLs and
//!   visibility are never stored, they follow the current parent chain.
//! - **Observable edits**: post revisions and topic bump counters are kept
//!   so that silent migrations can be told apart from authored edits.

use std::collections::BTreeMap;
use std::path::Path;

use parking_lot::RwLock;
use tracing::{debug, warn};

use recat_core::{
    Actor, Category, CategoryId, Error, Group, MatchedPost, Permalink, Permissions, Post, PostId,
    PostMatcher, PostRevision, Repository, Result, RevisionOptions, SlugPath, Tag, TagId, Topic,
    TopicFilter, TopicId, Viewer,
};

use crate::dump::ForumDump;

#[derive(Debug, Default)]
struct ForumState {
    categories: BTreeMap<CategoryId, Category>,
    topics: BTreeMap<TopicId, Topic>,
    posts: BTreeMap<PostId, Post>,
    tags: BTreeMap<TagId, Tag>,
    permalinks: BTreeMap<String, CategoryId>,
}

impl ForumState {
    fn category(&self, id: CategoryId) -> Result<&Category> {
        self.categories.get(&id).ok_or(Error::CategoryNotFound(id))
    }

    fn category_mut(&mut self, id: CategoryId) -> Result<&mut Category> {
        self.categories.get_mut(&id).ok_or(Error::CategoryNotFound(id))
    }

    fn topic_mut(&mut self, id: TopicId) -> Result<&mut Topic> {
        self.topics.get_mut(&id).ok_or(Error::TopicNotFound(id))
    }

    fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.values().find(|t| t.name == name)
    }

    /// Ids from `id` up to its root, self first
    ///
    /// A parent chain longer than the number of categories is a cycle.
    fn ancestry(&self, id: CategoryId) -> Result<Vec<CategoryId>> {
        let mut chain = vec![id];
        let mut current = self.category(id)?;
        while let Some(parent) = current.parent {
            if chain.len() > self.categories.len() {
                return Err(Error::InvalidInput(format!(
                    "category {} has a cyclic parent chain",
                    id
                )));
            }
            chain.push(parent);
            current = self.category(parent)?;
        }
        Ok(chain)
    }

    fn slug_path(&self, id: CategoryId) -> Result<SlugPath> {
        let mut slugs = Vec::new();
        for ancestor in self.ancestry(id)?.into_iter().rev() {
            slugs.push(self.category(ancestor)?.slug.clone());
        }
        SlugPath::new(slugs)
    }

    fn post_url(&self, post: &Post) -> String {
        match self.topics.get(&post.topic_id) {
            Some(topic) => format!("/t/{}/{}/{}", topic.slug, topic.id, post.post_number),
            None => format!("/p/{}", post.id),
        }
    }

    fn next_tag_id(&self) -> TagId {
        TagId(self.tags.keys().next_back().map_or(1, |id| id.0 + 1))
    }
}

/// In-memory forum repository
///
/// Implements [`Repository`] for the command-line tool (backed by a JSON
/// dump) and for tests.
#[derive(Debug, Default)]
pub struct MemoryForum {
    state: RwLock<ForumState>,
}

impl MemoryForum {
    /// Create an empty forum
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forum from a dump
    pub fn from_dump(dump: ForumDump) -> Self {
        let state = ForumState {
            categories: dump.categories.into_iter().map(|c| (c.id, c)).collect(),
            topics: dump.topics.into_iter().map(|t| (t.id, t)).collect(),
            posts: dump.posts.into_iter().map(|p| (p.id, p)).collect(),
            tags: dump.tags.into_iter().map(|t| (t.id, t)).collect(),
            permalinks: dump
                .permalinks
                .into_iter()
                .map(|p| (p.url, p.category_id))
                .collect(),
        };
        Self {
            state: RwLock::new(state),
        }
    }

    /// Snapshot the forum as a dump
    pub fn to_dump(&self) -> ForumDump {
        let state = self.state.read();
        ForumDump {
            categories: state.categories.values().cloned().collect(),
            topics: state.topics.values().cloned().collect(),
            posts: state.posts.values().cloned().collect(),
            tags: state.tags.values().cloned().collect(),
            permalinks: state
                .permalinks
                .iter()
                .map(|(url, category_id)| Permalink {
                    url: url.clone(),
                    category_id: *category_id,
                })
                .collect(),
        }
    }

    /// Load a forum from a JSON dump file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dump = ForumDump::load(path)?;
        debug!(
            target: "recat::store",
            path = %path.display(),
            categories = dump.categories.len(),
            topics = dump.topics.len(),
            posts = dump.posts.len(),
            "Loaded forum dump"
        );
        Ok(Self::from_dump(dump))
    }

    /// Write the forum back to a JSON dump file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_dump().save(path)?;
        debug!(target: "recat::store", path = %path.display(), "Saved forum dump");
        Ok(())
    }

    /// A topic by id
    pub fn topic(&self, id: TopicId) -> Result<Topic> {
        self.state
            .read()
            .topics
            .get(&id)
            .cloned()
            .ok_or(Error::TopicNotFound(id))
    }

    /// A post by id
    pub fn post(&self, id: PostId) -> Result<Post> {
        self.state
            .read()
            .posts
            .get(&id)
            .cloned()
            .ok_or(Error::PostNotFound(id))
    }

    /// Tag names attached to a topic, in tag id order
    pub fn topic_tag_names(&self, id: TopicId) -> Result<Vec<String>> {
        let state = self.state.read();
        let topic = state.topics.get(&id).ok_or(Error::TopicNotFound(id))?;
        let mut ids = topic.tags.clone();
        ids.sort();
        Ok(ids
            .iter()
            .filter_map(|tag| state.tags.get(tag).map(|t| t.name.clone()))
            .collect())
    }

    /// Target of the permalink registered for `url`, if any
    pub fn permalink(&self, url: &str) -> Option<CategoryId> {
        self.state.read().permalinks.get(url).copied()
    }

    /// All permalinks, in URL order
    pub fn permalinks(&self) -> Vec<Permalink> {
        self.to_dump().permalinks
    }
}

impl Repository for MemoryForum {
    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.state.read().categories.values().cloned().collect())
    }

    fn category(&self, id: CategoryId) -> Result<Category> {
        self.state.read().category(id).cloned()
    }

    fn save_category(&self, category: &Category) -> Result<()> {
        let mut state = self.state.write();
        if let Some(parent) = category.parent {
            state.category(parent)?;
            if state.ancestry(parent)?.contains(&category.id) {
                return Err(Error::InvalidInput(format!(
                    "category {} cannot be nested under its own descendant {}",
                    category.id, parent
                )));
            }
        }
        let stored = state.category_mut(category.id)?;
        stored.name = category.name.clone();
        stored.description = category.description.clone();
        stored.color = category.color.clone();
        stored.slug = category.slug.clone();
        stored.parent = category.parent;
        Ok(())
    }

    fn slug_path(&self, id: CategoryId) -> Result<SlugPath> {
        self.state.read().slug_path(id)
    }

    fn category_url(&self, id: CategoryId) -> Result<String> {
        let path = self.state.read().slug_path(id)?;
        Ok(format!("/c/{}/{}", path.segments().join("/"), id))
    }

    fn set_permissions(&self, id: CategoryId, permissions: Permissions) -> Result<()> {
        self.state.write().category_mut(id)?.permissions = permissions;
        Ok(())
    }

    fn can_see_category(&self, viewer: Viewer, id: CategoryId) -> Result<bool> {
        let state = self.state.read();
        let ancestry = state.ancestry(id)?;
        match viewer {
            Viewer::Admin => Ok(true),
            Viewer::Anonymous => {
                for ancestor in ancestry {
                    let category = state.category(ancestor)?;
                    if category.permissions.level(&Group::Everyone).is_none() {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    fn rename_category_definition(&self, id: CategoryId) -> Result<()> {
        let mut state = self.state.write();
        let category = state.category(id)?;
        let title = category.definition_title();
        let Some(topic_id) = category.definition_topic else {
            debug!(target: "recat::store", category = %id, "Category has no definition topic");
            return Ok(());
        };
        match state.topics.get_mut(&topic_id) {
            Some(topic) => topic.title = title,
            None => warn!(
                target: "recat::store",
                category = %id,
                topic = %topic_id,
                "Definition topic no longer exists, skipping rename"
            ),
        }
        Ok(())
    }

    fn update_category_stats(&self) -> Result<()> {
        let mut state = self.state.write();
        let mut posts_per_topic: BTreeMap<TopicId, u64> = BTreeMap::new();
        for post in state.posts.values() {
            *posts_per_topic.entry(post.topic_id).or_default() += 1;
        }

        let mut stats: BTreeMap<CategoryId, (u64, u64)> = BTreeMap::new();
        for topic in state.topics.values() {
            let is_definition = state
                .categories
                .get(&topic.category_id)
                .map_or(false, |c| c.definition_topic == Some(topic.id));
            if is_definition {
                continue;
            }
            let entry = stats.entry(topic.category_id).or_default();
            entry.0 += 1;
            entry.1 += posts_per_topic.get(&topic.id).copied().unwrap_or(0);
        }

        for (id, category) in state.categories.iter_mut() {
            let (topics, posts) = stats.get(id).copied().unwrap_or((0, 0));
            category.topic_count = topics;
            category.post_count = posts;
        }
        Ok(())
    }

    fn create_permalink(&self, permalink: Permalink) -> Result<()> {
        let mut state = self.state.write();
        state.category(permalink.category_id)?;
        if let Some(previous) = state
            .permalinks
            .insert(permalink.url.clone(), permalink.category_id)
        {
            if previous != permalink.category_id {
                debug!(
                    target: "recat::store",
                    url = %permalink.url,
                    from = %previous,
                    to = %permalink.category_id,
                    "Permalink retargeted"
                );
            }
        }
        Ok(())
    }

    fn topics_in_category(&self, id: CategoryId, filter: &TopicFilter) -> Result<Vec<TopicId>> {
        let state = self.state.read();
        let category = state.category(id)?;
        let definition = if filter.exclude_definition {
            category.definition_topic
        } else {
            None
        };
        let required_tag = match &filter.with_tag {
            Some(name) => match state.tag_by_name(name) {
                Some(tag) => Some(tag.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        Ok(state
            .topics
            .values()
            .filter(|t| t.category_id == id)
            .filter(|t| Some(t.id) != definition)
            .filter(|t| required_tag.map_or(true, |tag| t.tags.contains(&tag)))
            .map(|t| t.id)
            .collect())
    }

    fn move_topics(&self, topics: &[TopicId], target: CategoryId) -> Result<usize> {
        let mut state = self.state.write();
        state.category(target)?;
        if let Some(missing) = topics.iter().find(|id| !state.topics.contains_key(id)) {
            return Err(Error::TopicNotFound(*missing));
        }
        for id in topics {
            state.topic_mut(*id)?.category_id = target;
        }
        Ok(topics.len())
    }

    fn find_tag(&self, name: &str) -> Result<Option<Tag>> {
        Ok(self.state.read().tag_by_name(name).cloned())
    }

    fn tag_topic(
        &self,
        topic: TopicId,
        names: &[String],
        actor: Actor,
        append: bool,
    ) -> Result<usize> {
        let mut state = self.state.write();
        state.topic_mut(topic)?;

        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let existing = state.tag_by_name(name).map(|t| t.id);
            let id = match existing {
                Some(id) => id,
                None if actor == Actor::System => {
                    let id = state.next_tag_id();
                    state.tags.insert(
                        id,
                        Tag {
                            id,
                            name: name.clone(),
                        },
                    );
                    debug!(target: "recat::store", tag = %name, id = %id, "Created tag");
                    id
                }
                None => {
                    return Err(Error::PermissionDenied(format!(
                        "cannot create tag '{}' as {:?}",
                        name, actor
                    )))
                }
            };
            ids.push(id);
        }

        let topic = state.topic_mut(topic)?;
        if !append {
            topic.tags.clear();
        }
        let mut attached = 0;
        for id in ids {
            if !topic.tags.contains(&id) {
                topic.tags.push(id);
                attached += 1;
            }
        }
        Ok(attached)
    }

    fn remove_tag(&self, topic: TopicId, tag: TagId) -> Result<bool> {
        let mut state = self.state.write();
        let topic = state.topic_mut(topic)?;
        let before = topic.tags.len();
        topic.tags.retain(|t| *t != tag);
        Ok(topic.tags.len() != before)
    }

    fn posts_matching(
        &self,
        matcher: &PostMatcher,
        after: Option<PostId>,
        limit: usize,
    ) -> Result<Vec<MatchedPost>> {
        let state = self.state.read();
        let start = after.map_or(0, |id| id.0.saturating_add(1));
        Ok(state
            .posts
            .range(PostId(start)..)
            .map(|(_, post)| post)
            .filter(|post| matcher.is_match(&post.raw))
            .take(limit)
            .map(|post| MatchedPost {
                id: post.id,
                url: state.post_url(post),
                raw: post.raw.clone(),
            })
            .collect())
    }

    fn revise_post(&self, id: PostId, raw: String, options: RevisionOptions) -> Result<()> {
        let mut state = self.state.write();
        let post = state.posts.get_mut(&id).ok_or(Error::PostNotFound(id))?;
        if !options.skip_revision {
            let previous = std::mem::replace(&mut post.raw, raw);
            post.revisions.push(PostRevision {
                version: post.version,
                raw: previous,
            });
            post.version += 1;
        } else {
            post.raw = raw;
        }
        let topic_id = post.topic_id;
        if !options.bypass_bump {
            state.topic_mut(topic_id)?.bump_count += 1;
        }
        Ok(())
    }
}
