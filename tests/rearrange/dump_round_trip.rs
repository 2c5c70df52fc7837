//! Forum dumps survive a save/open cycle.

use recat::types::{Group, TopicId};
use recat::{ForumDump, MemoryForum, Repository};

use crate::common::{cat, community, Workspace};

#[test]
fn save_then_open_preserves_forum() {
    let forum = community();
    let ws = Workspace::new(&forum, "");
    assert_eq!(ws.reload().to_dump(), forum.to_dump());
}

#[test]
fn permissions_are_keyed_by_group_name() {
    let ws = Workspace::new(&community(), "");
    let value: serde_json::Value = serde_json::from_str(&ws.dump_text()).unwrap();
    let staff = value["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == 9)
        .unwrap();
    assert_eq!(staff["permissions"]["admins"], "full");
    assert!(staff["permissions"].get("everyone").is_none());

    let forum = ws.reload();
    let support = forum.category(cat(3)).unwrap();
    assert!(support.permissions.level(&Group::Everyone).is_some());
}

#[test]
fn empty_plan_only_recomputes_stats() {
    let ws = Workspace::new(&community(), "");
    let report = ws.run().unwrap();
    assert_eq!(report.changed, 0);

    let forum = ws.reload();
    let support = forum.category(cat(3)).unwrap();
    assert_eq!(support.topic_count, 3);
    assert_eq!(support.post_count, 3);
    assert_eq!(forum.topic(TopicId(100)).unwrap().bump_count, 0);
}

#[test]
fn malformed_dump_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forum.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(MemoryForum::open(&path).is_err());
    assert!(ForumDump::from_json(r#"{"categories": 3}"#).is_err());
}
