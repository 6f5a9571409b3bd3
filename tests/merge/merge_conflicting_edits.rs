use crate::common;
use crate::common::command::{repository_dir, run_twig_command, twig_commit, twig_merge};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn overwrite_and_commit(dir: &std::path::Path, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join("x"), content.to_string()));
    run_twig_command(dir, &["add", "x"]).assert().success();
    twig_commit(dir, message).assert().success();
}

/// Both branches rewrite `x` after forking from c1
///
/// History:
///   c0 ── c1 ── c3   master
///          \
///           c2       feature
///
/// Expected: a conflict on `x` that blocks every other command until `x`
/// is re-added and committed
#[rstest]
fn merge_conflicting_edits(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_twig_command(dir.path(), &["init"]).assert().success();
    overwrite_and_commit(dir.path(), "v1", "c1");

    run_twig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_twig_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    overwrite_and_commit(dir.path(), "v2", "c2");
    let c2 = common::head_oid(dir.path());

    run_twig_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert_eq!(common::read_file(dir.path(), "x"), "v1");
    overwrite_and_commit(dir.path(), "v3", "c3");
    let c3 = common::head_oid(dir.path());

    twig_merge(dir.path(), "feature")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "CONFLICT (content): Merge conflict in x\n",
        ));

    // both versions end up in the working tree, receiver first
    assert_eq!(
        common::read_file(dir.path(), "x"),
        "<<<<<<< HEAD\nv3\n=======\nv2\n>>>>>>> feature\n"
    );
    assert_eq!(common::read_file(dir.path(), ".twig/MERGE_HEAD").trim(), c2);
    assert_eq!(common::head_oid(dir.path()), c3);

    let output = run_twig_command(dir.path(), &["ls-index"]).output()?;
    let stages = String::from_utf8(output.stdout)?
        .lines()
        .map(|line| line.chars().next().unwrap_or(' '))
        .collect::<String>();
    assert_eq!(stages, "123");

    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unmerged paths:\n        x\n"));

    // the merge gate holds until the conflict is resolved
    twig_commit(dir.path(), "too early")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unresolved conflicts in: x"));
    for args in [
        vec!["checkout", "feature"],
        vec!["branch", "other"],
        vec!["merge", "feature"],
    ] {
        run_twig_command(dir.path(), &args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("merge in progress"));
    }
    assert!(!dir.path().join(".twig/refs/heads/other").exists());

    write_file(FileSpec::new(dir.path().join("x"), "v2 and v3".to_string()));
    run_twig_command(dir.path(), &["add", "x"]).assert().success();
    twig_commit(dir.path(), "resolve").assert().success();

    assert!(!dir.path().join(".twig/MERGE_HEAD").exists());
    let resolved = common::head_oid(dir.path());
    let output = run_twig_command(dir.path(), &["cat-file", &resolved]).output()?;
    let record = String::from_utf8(output.stdout)?;
    assert!(record.contains(&format!("\nparent {}\n", c2)));

    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit, working tree clean"));
    run_twig_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    assert_eq!(common::read_file(dir.path(), "x"), "v2");

    Ok(())
}

/// A conflicted merge keeps the clean changes of the giver for the
/// resolving commit
#[rstest]
fn resolving_commit_contains_the_whole_merge(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_twig_command(dir.path(), &["init"]).assert().success();
    overwrite_and_commit(dir.path(), "v1", "c1");
    run_twig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_twig_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("extra.txt"), "extra".to_string()));
    run_twig_command(dir.path(), &["add", "extra.txt"])
        .assert()
        .success();
    overwrite_and_commit(dir.path(), "v2", "c2");

    run_twig_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    overwrite_and_commit(dir.path(), "v3", "c3");

    twig_merge(dir.path(), "feature").assert().failure();
    assert_eq!(common::read_file(dir.path(), "extra.txt"), "extra");

    write_file(FileSpec::new(dir.path().join("x"), "merged".to_string()));
    run_twig_command(dir.path(), &["add", "x"]).assert().success();
    twig_commit(dir.path(), "resolve").assert().success();

    // leave and come back so the files come from the stored commit
    let resolved = common::head_oid(dir.path());
    run_twig_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    run_twig_command(dir.path(), &["checkout", &resolved])
        .assert()
        .success();

    assert_eq!(common::read_file(dir.path(), "extra.txt"), "extra");
    assert_eq!(common::read_file(dir.path(), "x"), "merged");

    Ok(())
}
