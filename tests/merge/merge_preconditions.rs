use crate::common;
use crate::common::command::{commit_file, init_repository_dir, run_twig_command, twig_merge};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn assert_untouched(dir: &std::path::Path, head: &str) {
    assert_eq!(common::head_oid(dir), head);
    assert!(!dir.join(".twig/MERGE_HEAD").exists());
}

#[rstest]
fn merge_nonexistent_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let head = common::head_oid(dir.path());

    twig_merge(dir.path(), "ghost")
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch ghost does not exist"));

    assert_untouched(dir.path(), &head);
}

#[rstest]
#[case::current_branch("master")]
#[case::same_commit("twin")]
fn merge_with_itself_fails(init_repository_dir: TempDir, #[case] giver: &str) {
    let dir = init_repository_dir;
    run_twig_command(dir.path(), &["branch", "twin"])
        .assert()
        .success();
    let head = common::head_oid(dir.path());

    twig_merge(dir.path(), giver)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot merge a branch with itself"));

    assert_untouched(dir.path(), &head);
}

#[rstest]
fn merge_in_detached_head_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let c1 = common::head_oid(dir.path());
    run_twig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    commit_file(dir.path(), "x", "v2", "c2");

    run_twig_command(dir.path(), &["checkout", &c1])
        .assert()
        .success();

    twig_merge(dir.path(), "master")
        .assert()
        .failure()
        .stderr(predicate::str::contains("detached HEAD"));

    assert_untouched(dir.path(), &c1);
}
