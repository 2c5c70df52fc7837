//! Plans that must not run, and runs that stop part way.

use std::sync::Arc;

use recat::types::Permissions;
use recat::{Error, MemoryForum, Phase, Plan, Rearrangement, Repository};

use crate::common::{cat, community, Workspace};

#[test]
fn unknown_operation_leaves_dump_untouched() {
    let ws = Workspace::new(
        &community(),
        r#"
- hideCategory: {category: 3}
- describe: {category: 6, slug: help}
- renameEverything: {category: 6}
"#,
    );
    let before = ws.dump_text();

    let err = ws.run().unwrap_err();
    assert!(matches!(err, Error::UnknownOperation { index: 3, .. }));
    assert!(err.is_configuration());
    assert_eq!(ws.dump_text(), before);
}

#[test]
fn bad_arguments_leave_dump_untouched() {
    let ws = Workspace::new(
        &community(),
        r#"
- hideCategory: {category: 3}
- movePosts: {source: 3, target: 6, keepSource: true}
"#,
    );
    let before = ws.dump_text();

    let err = ws.run().unwrap_err();
    assert!(matches!(err, Error::InvalidArguments { index: 2, .. }));
    assert_eq!(ws.dump_text(), before);
}

#[test]
fn missing_plan_file_is_an_io_error() {
    let err = Plan::load("/nonexistent/rearrange.yaml").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn failing_operation_aborts_without_remap() {
    let forum = Arc::new(community());
    let plan = Plan::from_yaml_str(
        r#"
- describe: {category: 6, slug: help}
- movePosts: {source: 3, target: 42}
- exposeCategory: {category: 9}
"#,
    )
    .unwrap();

    let mut run = Rearrangement::new(forum.clone());
    run.init(plan).unwrap();
    assert!(run.iterate().is_err());
    assert_eq!(run.phase(), Phase::Aborted);
    assert!(run.finalize().is_err());

    // the rename before the failure stays applied, nothing after it ran
    assert_eq!(forum.category(cat(6)).unwrap().slug, "help");
    assert_eq!(
        forum.category(cat(9)).unwrap().permissions,
        Permissions::admins_only()
    );
    assert_eq!(crate::common::raw(&forum, 1003), "Manual in #docs");
}

#[test]
fn failing_run_is_not_saved() {
    let ws = Workspace::new(&community(), "- hideCategory: {category: 42}");
    let before = ws.dump_text();

    assert!(matches!(ws.run(), Err(Error::Repository(_))));
    assert_eq!(ws.dump_text(), before);
    assert!(MemoryForum::open(&ws.dump).is_ok());
}
