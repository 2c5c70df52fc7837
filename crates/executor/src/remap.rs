//! Slug tag remapping.
//!
//! At the end of a run, post bodies that still reference categories by
//! their old reference strings are rewritten to the strings of the
//! categories those references now mean.
//!
//! # Algorithm
//!
//! 1. For each ledger entry `source → target`: `from` is the source's
//!    reference string captured before the run ([`StartTags`]), `to` is the
//!    target's reference string now.
//! 2. Nested mappings (`#root:child`) are ordered before root mappings
//!    (`#root`). A root mapping applied first would rewrite the root part
//!    of a nested reference that has its own mapping.
//! 3. Posts are pre-filtered with a case-insensitive alternation of every
//!    `from`, walked in id-ordered batches.
//! 4. Every mapping is applied to each selected post, in order, as a
//!    literal case-sensitive substring replacement. Posts whose body ends up
//!    unchanged (selected by a case variant only) are reported and left
//!    alone; the rest are saved without bump or revision.

use std::collections::BTreeMap;

use tracing::{debug, info};

use recat_core::{CategoryId, Error as RepoError, PostMatcher, Repository, RevisionOptions, SlugTag};

use crate::ledger::RedirectLedger;
use crate::Result;

/// Posts fetched per scan batch
pub const REMAP_BATCH_SIZE: usize = 1000;

/// Every category's reference string, captured before any operation runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartTags(BTreeMap<CategoryId, SlugTag>);

impl StartTags {
    /// Capture the current reference string of every category
    pub fn capture(repo: &dyn Repository) -> Result<Self> {
        let mut tags = BTreeMap::new();
        for category in repo.categories()? {
            let tag = repo.slug_path(category.id)?.slug_tag();
            tags.insert(category.id, tag);
        }
        Ok(Self(tags))
    }

    /// Reference string `id` had when captured
    pub fn get(&self, id: CategoryId) -> Option<&SlugTag> {
        self.0.get(&id)
    }

    /// Number of captured categories
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no categories were captured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(CategoryId, SlugTag)> for StartTags {
    fn from_iter<I: IntoIterator<Item = (CategoryId, SlugTag)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One literal rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugMapping {
    /// Redirected category
    pub source: CategoryId,
    /// Category the references now mean
    pub target: CategoryId,
    /// Reference string before the run
    pub from: SlugTag,
    /// Reference string to write instead
    pub to: SlugTag,
}

/// Counts from one remap pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemapReport {
    /// Mappings applied
    pub mappings: usize,
    /// Posts rewritten
    pub changed: usize,
    /// Posts selected by the pre-filter but left as they were
    pub unchanged: usize,
}

/// Apply `mappings` in order to `raw`.
pub fn apply_mappings(raw: &str, mappings: &[SlugMapping]) -> String {
    mappings.iter().fold(raw.to_string(), |body, m| {
        body.replace(m.from.as_str(), m.to.as_str())
    })
}

/// Rewrites historical post content after categories were redirected.
pub struct SlugTagRemapper<'a> {
    repo: &'a dyn Repository,
    batch_size: usize,
}

impl<'a> SlugTagRemapper<'a> {
    /// A remapper over `repo` using [`REMAP_BATCH_SIZE`]
    pub fn new(repo: &'a dyn Repository) -> Self {
        Self {
            repo,
            batch_size: REMAP_BATCH_SIZE,
        }
    }

    /// Override the scan batch size (minimum 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Build the ordered mapping list: nested sources first, then roots.
    ///
    /// Within each group mappings keep ledger order.
    ///
    /// # Errors
    ///
    /// Fails with `CategoryNotFound` if a ledgered source was not captured
    /// in `start` or the target no longer exists.
    pub fn mappings(&self, start: &StartTags, ledger: &RedirectLedger) -> Result<Vec<SlugMapping>> {
        let mut nested = Vec::new();
        let mut roots = Vec::new();
        for (source, target) in ledger.iter() {
            let from = start
                .get(source)
                .cloned()
                .ok_or(RepoError::CategoryNotFound(source))?;
            let to = self.repo.slug_path(target)?.slug_tag();
            let mapping = SlugMapping {
                source,
                target,
                from,
                to,
            };
            if mapping.from.is_nested() {
                nested.push(mapping);
            } else {
                roots.push(mapping);
            }
        }
        nested.extend(roots);
        Ok(nested)
    }

    /// Run one remap pass. A no-op when the ledger is empty.
    pub fn run(&self, start: &StartTags, ledger: &RedirectLedger) -> Result<RemapReport> {
        if ledger.is_empty() {
            debug!(target: "recat::remap", "Ledger empty, nothing to remap");
            return Ok(RemapReport::default());
        }

        let mappings = self.mappings(start, ledger)?;
        for m in &mappings {
            info!(target: "recat::remap", from = %m.from, to = %m.to, "mapping {} to {}", m.from, m.to);
        }

        let matcher = PostMatcher::any_literal(mappings.iter().map(|m| m.from.as_str()))?;
        debug!(target: "recat::remap", pattern = matcher.as_str(), "Scanning posts");

        let mut report = RemapReport {
            mappings: mappings.len(),
            ..RemapReport::default()
        };
        let mut cursor = None;
        loop {
            let batch = self.repo.posts_matching(&matcher, cursor, self.batch_size)?;
            let Some(last) = batch.last() else {
                break;
            };
            cursor = Some(last.id);
            let exhausted = batch.len() < self.batch_size;

            for post in batch {
                let raw = apply_mappings(&post.raw, &mappings);
                if raw == post.raw {
                    info!(target: "recat::remap", post = %post.id, "Not changed: {}", post.url);
                    report.unchanged += 1;
                } else {
                    self.repo.revise_post(post.id, raw, RevisionOptions::silent())?;
                    info!(target: "recat::remap", post = %post.id, "Changed: {}", post.url);
                    report.changed += 1;
                }
            }

            if exhausted {
                break;
            }
        }

        Ok(report)
    }
}
