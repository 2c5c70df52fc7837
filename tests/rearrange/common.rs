//! Shared helpers for rearrangement tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use recat::types::{CategoryId, Permissions, PostId};
use recat::{ForumBuilder, MemoryForum, Plan, RemapReport, Rearrangement};
use tempfile::TempDir;

/// A forum dump and plan file in a temporary directory.
pub struct Workspace {
    pub dir: TempDir,
    pub dump: PathBuf,
    pub plan: PathBuf,
}

impl Workspace {
    /// Write `forum` as the dump and `plan` as the plan file.
    pub fn new(forum: &MemoryForum, plan: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("forum.json");
        let plan_path = dir.path().join("rearrange.yaml");
        forum.save(&dump).unwrap();
        fs::write(&plan_path, plan).unwrap();
        Self {
            dir,
            dump,
            plan: plan_path,
        }
    }

    /// Load, run and save, the way the command-line tool does.
    pub fn run(&self) -> recat::Result<RemapReport> {
        let plan = Plan::load(&self.plan)?;
        let forum = Arc::new(MemoryForum::open(&self.dump)?);
        let report = Rearrangement::run(forum.clone(), plan)?;
        forum.save(&self.dump)?;
        Ok(report)
    }

    /// The forum as currently saved
    pub fn reload(&self) -> MemoryForum {
        MemoryForum::open(&self.dump).unwrap()
    }

    /// Raw dump text
    pub fn dump_text(&self) -> String {
        fs::read_to_string(&self.dump).unwrap()
    }
}

/// Community forum with a support area being folded into docs.
///
/// | id | path | notes |
/// |----|------|-------|
/// | 3 | support | topics 100 (faq), 101 (faq), 102 |
/// | 4 | support/billing | topic 110 |
/// | 6 | docs | topic 200 |
/// | 8 | lounge | topic 300 |
/// | 9 | staff | admins only, the hidden parking spot |
pub fn community() -> MemoryForum {
    ForumBuilder::new()
        .category(3, "support")
        .child_category(4, 3, "billing")
        .category(6, "docs")
        .color(6, "AA0000")
        .category(8, "lounge")
        .category(9, "staff")
        .color(9, "111111")
        .permissions(9, Permissions::admins_only())
        .topic(100, 3, &["faq"])
        .topic(101, 3, &["faq"])
        .topic(102, 3, &[])
        .topic(110, 4, &[])
        .topic(200, 6, &[])
        .topic(300, 8, &["offtopic"])
        .post(1000, 100, "Start with #support")
        .post(1001, 101, "Invoices: see #support:billing")
        .post(1002, 102, "Nothing to see")
        .post(1003, 200, "Manual in #docs")
        .post(1004, 300, "Anyone in #lounge?")
        .post(1005, 300, "Try #Support instead")
        .build()
}

/// Raw body of a post
pub fn raw(forum: &MemoryForum, id: u64) -> String {
    forum.post(PostId(id)).unwrap().raw
}

/// Shorthand for category ids
pub fn cat(id: u64) -> CategoryId {
    CategoryId(id)
}
