//! Topic handlers.
//!
//! Bulk moves, tagging and URL redirects. `movePosts` is the one that
//! consolidates categories and records ledger entries.

use tracing::{debug, info, warn};

use recat_core::{Actor, Error as RepoError, Permalink, Repository, TopicFilter};

use crate::executor::RunContext;
use crate::handlers::category::hide_category;
use crate::operation::{CategoryRef, CategoryTag, MovePosts, Redirect};
use crate::{Output, Result};

/// What `movePosts` does to the source category after moving.
///
/// Defaults come from a decision table keyed by whether the move is
/// tag-scoped:
///
/// | Tag-scoped (`withTag` set) | hide | redirect |
/// |----------------------------|------|----------|
/// | no (full consolidation)    | yes  | yes      |
/// | yes (partial move)         | no   | no       |
///
/// The table applies only when `hide` is absent. Once `hide` is given, a
/// missing `redirect` means no redirect. An explicit `redirect` always
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePolicy {
    /// Make the source admins-only
    pub hide: bool,
    /// Redirect the source URL to the target
    pub redirect: bool,
}

impl MovePolicy {
    const CONSOLIDATE: MovePolicy = MovePolicy {
        hide: true,
        redirect: true,
    };
    const PARTIAL: MovePolicy = MovePolicy {
        hide: false,
        redirect: false,
    };

    /// Defaults for a move
    pub fn defaults(tag_scoped: bool) -> Self {
        if tag_scoped {
            Self::PARTIAL
        } else {
            Self::CONSOLIDATE
        }
    }

    /// Policy for the given arguments
    pub fn resolve(tag_scoped: bool, hide: Option<bool>, redirect: Option<bool>) -> Self {
        match hide {
            None => {
                let defaults = Self::defaults(tag_scoped);
                Self {
                    hide: defaults.hide,
                    redirect: redirect.unwrap_or(defaults.redirect),
                }
            }
            Some(hide) => Self {
                hide,
                redirect: redirect.unwrap_or(false),
            },
        }
    }

    /// True if the source stops standing for itself
    pub fn retires_source(&self) -> bool {
        self.hide || self.redirect
    }
}

/// Handle redirect.
pub fn redirect(repo: &dyn Repository, args: &Redirect) -> Result<Output> {
    repo.create_permalink(Permalink {
        url: args.url.clone(),
        category_id: args.category,
    })?;
    Ok(Output::Unit)
}

/// Handle movePosts.
///
/// The source's definition topic never moves. The source URL is taken
/// before hiding, since hiding may reparent the source and change it.
pub fn move_posts(repo: &dyn Repository, ctx: &mut RunContext, args: &MovePosts) -> Result<Output> {
    let policy = MovePolicy::resolve(args.with_tag.is_some(), args.hide, args.redirect);

    if let Some(tag) = &args.add_tag {
        tag_category(
            repo,
            &CategoryTag {
                category: args.source,
                tag: tag.clone(),
            },
        )?;
    }

    let mut filter = TopicFilter::movable();
    if let Some(tag) = &args.with_tag {
        filter = filter.with_tag(tag.clone());
    }
    let topics = repo.topics_in_category(args.source, &filter)?;
    let count = repo.move_topics(&topics, args.target)?;
    info!(
        target: "recat::op",
        source = %args.source,
        target = %args.target,
        count,
        "Moved topics"
    );

    if policy.redirect {
        let url = repo.category_url(args.source)?;
        redirect(
            repo,
            &Redirect {
                url,
                category: args.target,
            },
        )?;
    }
    if policy.hide {
        hide_category(
            repo,
            ctx,
            &CategoryRef {
                category: args.source,
            },
        )?;
    }
    if policy.retires_source() {
        ctx.ledger.record(args.source, args.target);
    }

    Ok(Output::TopicsMoved {
        count,
        hidden: policy.hide,
        redirected: policy.redirect,
    })
}

/// Handle tagCategory.
///
/// Runs as the system user. Tags are appended; topics already carrying the
/// tag are left alone, so reruns are no-ops.
pub fn tag_category(repo: &dyn Repository, args: &CategoryTag) -> Result<Output> {
    let names = [args.tag.clone()];
    let mut count = 0;
    for topic in repo.topics_in_category(args.category, &TopicFilter::all())? {
        match repo.tag_topic(topic, &names, Actor::System, true) {
            Ok(0) => debug!(target: "recat::op", topic = %topic, tag = %args.tag, "Already tagged"),
            Ok(_) => count += 1,
            Err(RepoError::TopicNotFound(_)) => {
                warn!(target: "recat::op", topic = %topic, "Topic vanished before tagging, skipped")
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(Output::TopicsTagged { count })
}

/// Handle removeTagInCategory.
///
/// A tag that does not exist is attached to nothing, so the operation
/// completes without changes.
pub fn remove_tag_in_category(repo: &dyn Repository, args: &CategoryTag) -> Result<Output> {
    let Some(tag) = repo.find_tag(&args.tag)? else {
        warn!(target: "recat::op", tag = %args.tag, "Tag does not exist, nothing to remove");
        return Ok(Output::TopicsUntagged { count: 0 });
    };

    let filter = TopicFilter::all().with_tag(tag.name.clone());
    let mut count = 0;
    for topic in repo.topics_in_category(args.category, &filter)? {
        match repo.remove_tag(topic, tag.id) {
            Ok(true) => count += 1,
            Ok(false) => {}
            Err(RepoError::TopicNotFound(_)) => {
                warn!(target: "recat::op", topic = %topic, "Topic vanished before untagging, skipped")
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(Output::TopicsUntagged { count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults_table() {
        assert_eq!(
            MovePolicy::defaults(false),
            MovePolicy {
                hide: true,
                redirect: true
            }
        );
        assert_eq!(
            MovePolicy::defaults(true),
            MovePolicy {
                hide: false,
                redirect: false
            }
        );
    }

    #[test]
    fn test_policy_explicit_hide_skips_defaults() {
        let p = MovePolicy::resolve(false, Some(false), None);
        assert!(!p.hide);
        assert!(!p.redirect);
        assert!(!p.retires_source());

        let p = MovePolicy::resolve(false, Some(true), None);
        assert!(p.hide);
        assert!(!p.redirect);

        let p = MovePolicy::resolve(true, Some(false), Some(true));
        assert!(!p.hide);
        assert!(p.redirect);
    }

    #[test]
    fn test_policy_explicit_redirect_wins_over_default() {
        let p = MovePolicy::resolve(true, None, Some(true));
        assert!(!p.hide);
        assert!(p.redirect);

        let p = MovePolicy::resolve(false, None, Some(false));
        assert!(p.hide);
        assert!(!p.redirect);
    }
}
