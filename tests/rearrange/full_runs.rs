//! Complete plans run from files, checked against the saved dump.

use recat::types::{Permissions, TopicId};
use recat::{RemapReport, Repository};

use crate::common::{cat, community, raw, Workspace};

const CONSOLIDATE: &str = r#"
- setHiddenCategory:
    category: 9
- describe:
    context: Docs becomes the help centre
    category: 6
    name: Help Centre
    slug: help
- movePosts:
    context: Support questions live in the help centre now
    source: 3
    target: 6
"#;

#[test]
fn consolidation_moves_hides_and_rewrites() {
    let ws = Workspace::new(&community(), CONSOLIDATE);
    let report = ws.run().unwrap();
    assert_eq!(
        report,
        RemapReport {
            mappings: 2,
            changed: 3,
            unchanged: 1,
        }
    );

    let forum = ws.reload();
    for topic in [100, 101, 102] {
        assert_eq!(forum.topic(TopicId(topic)).unwrap().category_id, cat(6));
    }

    let support = forum.category(cat(3)).unwrap();
    assert_eq!(support.permissions, Permissions::admins_only());
    assert_eq!(support.parent, Some(cat(9)));
    assert_eq!(support.color, "111111");
    assert_eq!(forum.permalink("/c/support/3"), Some(cat(6)));

    let help = forum.category(cat(6)).unwrap();
    assert_eq!(help.name, "Help Centre");
    assert_eq!(help.topic_count, 4);
    assert_eq!(help.post_count, 4);
    assert_eq!(
        forum.topic(help.definition_topic.unwrap()).unwrap().title,
        "About the Help Centre category"
    );

    assert_eq!(raw(&forum, 1000), "Start with #help");
    assert_eq!(raw(&forum, 1003), "Manual in #help");
    assert_eq!(raw(&forum, 1004), "Anyone in #lounge?");
    assert_eq!(raw(&forum, 1005), "Try #Support instead");
}

#[test]
fn rerunning_a_plan_rewrites_nothing_more() {
    let ws = Workspace::new(&community(), CONSOLIDATE);
    ws.run().unwrap();
    let after_first = ws.reload().to_dump().posts;

    let second = ws.run().unwrap();
    assert_eq!(second.changed, 0);
    assert_eq!(ws.reload().to_dump().posts, after_first);
}

#[test]
fn tag_scoped_move_only_moves_tagged_topics() {
    let ws = Workspace::new(
        &community(),
        "- movePosts: {source: 3, target: 6, withTag: faq}",
    );
    let report = ws.run().unwrap();
    assert_eq!(report, RemapReport::default());

    let forum = ws.reload();
    assert_eq!(forum.topic(TopicId(100)).unwrap().category_id, cat(6));
    assert_eq!(forum.topic(TopicId(101)).unwrap().category_id, cat(6));
    assert_eq!(forum.topic(TopicId(102)).unwrap().category_id, cat(3));
    assert_eq!(
        forum.category(cat(3)).unwrap().permissions,
        Permissions::everyone_full()
    );
    assert!(forum.permalinks().is_empty());
    assert_eq!(raw(&forum, 1000), "Start with #support");
}

#[test]
fn reparent_then_rename_rewrites_nested_references() {
    let ws = Workspace::new(
        &community(),
        r#"
- reparentCategory: {category: 4, parent: 6}
- describe: {category: 4, slug: payments}
"#,
    );
    let report = ws.run().unwrap();
    assert_eq!(report.changed, 1);

    let forum = ws.reload();
    assert_eq!(raw(&forum, 1001), "Invoices: see #docs:payments");
    assert_eq!(raw(&forum, 1000), "Start with #support");
    assert_eq!(forum.category(cat(4)).unwrap().color, "AA0000");
}

#[test]
fn lock_down_plan_respects_visibility() {
    let ws = Workspace::new(
        &community(),
        r#"
- hideCategory: {category: 8}
- publicCategoriesReadonly:
- tagCategory: {category: 6, tag: manual}
- removeTagInCategory: {category: 8, tag: offtopic}
- redirect: {url: /billing, category: 4}
"#,
    );
    let report = ws.run().unwrap();
    assert_eq!(report, RemapReport::default());

    let forum = ws.reload();
    for id in [3, 4, 6] {
        assert_eq!(
            forum.category(cat(id)).unwrap().permissions,
            Permissions::public_readonly()
        );
    }
    assert_eq!(
        forum.category(cat(8)).unwrap().permissions,
        Permissions::admins_only()
    );
    assert_eq!(
        forum.category(cat(9)).unwrap().permissions,
        Permissions::admins_only()
    );

    assert_eq!(
        forum.topic_tag_names(TopicId(200)).unwrap(),
        vec!["manual".to_string()]
    );
    assert!(forum.topic_tag_names(TopicId(300)).unwrap().is_empty());
    assert_eq!(forum.permalink("/billing"), Some(cat(4)));
}
