use crate::common;
use crate::common::command::{commit_file, init_repository_dir, run_twig_command, twig_merge};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// master is an ancestor of feature
///
/// History:
///   c0 ── c1 ── c2 ── c3
///         ^           ^
///       master     feature
///
/// Expected: master moves to c3 without a new commit object
#[rstest]
fn merge_fast_forward(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let c1 = common::head_oid(dir.path());

    run_twig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_twig_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir.path(), "x", "v2", "c2");
    commit_file(dir.path(), "docs/readme.md", "docs", "c3");
    let c3 = common::head_oid(dir.path());

    run_twig_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    let objects_before = common::object_count(dir.path());

    twig_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout(format!(
            "Updating {}..{}\nFast-forward\n",
            &c1[..7],
            &c3[..7]
        ));

    assert_eq!(common::branch_oid(dir.path(), "master"), c3);
    assert_eq!(common::object_count(dir.path()), objects_before);
    assert!(!dir.path().join(".twig/MERGE_HEAD").exists());
    assert_eq!(common::read_file(dir.path(), "x"), "v2");
    assert_eq!(common::read_file(dir.path(), "docs/readme.md"), "docs");

    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit, working tree clean"));
}

#[rstest]
fn merging_an_ancestor_is_already_up_to_date(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_twig_command(dir.path(), &["branch", "old"])
        .assert()
        .success();
    commit_file(dir.path(), "x", "v2", "c2");
    let head = common::head_oid(dir.path());

    twig_merge(dir.path(), "old")
        .assert()
        .success()
        .stdout("Already up to date.\n");

    assert_eq!(common::head_oid(dir.path()), head);
    assert!(!dir.path().join(".twig/MERGE_HEAD").exists());
}
