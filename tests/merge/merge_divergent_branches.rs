use crate::common;
use crate::common::command::{repository_dir, run_twig_command, twig_commit, twig_merge};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Test merging with simple divergent branches
///
/// History:
///       A (base)
///      / \
///     B   C
///     |   |
///   master  feature
///
/// Expected: a merge commit on top of C holding C's version of every path
/// both sides still have, plus the files only B added
#[rstest]
fn merge_divergent_branches(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_twig_command(dir.path(), &["init"]).assert().success();

    // Commit A: Create initial files
    for (name, content) in [
        ("base.txt", "base content\n"),
        ("left.txt", "initial\n"),
        ("right.txt", "initial\n"),
        ("gone.txt", "soon removed\n"),
    ] {
        write_file(FileSpec::new(dir.path().join(name), content.to_string()));
    }
    run_twig_command(dir.path(), &["add", "."]).assert().success();
    twig_commit(dir.path(), "Commit A - base").assert().success();

    run_twig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    // Commit B on master: Modify left.txt
    write_file(FileSpec::new(
        dir.path().join("left.txt"),
        "initial\nmaster change\n".to_string(),
    ));
    run_twig_command(dir.path(), &["add", "left.txt"])
        .assert()
        .success();
    twig_commit(dir.path(), "Commit B - master changes")
        .assert()
        .success();

    // Commit C on feature: Modify right.txt, add and remove files
    run_twig_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("right.txt"),
        "initial\nfeature change\n".to_string(),
    ));
    write_file(FileSpec::new(
        dir.path().join("src/new.txt"),
        "brand new\n".to_string(),
    ));
    run_twig_command(dir.path(), &["add", "right.txt", "src"])
        .assert()
        .success();
    run_twig_command(dir.path(), &["rm", "gone.txt"])
        .assert()
        .success();
    twig_commit(dir.path(), "Commit C - feature changes")
        .assert()
        .success();
    let commit_c = common::head_oid(dir.path());

    run_twig_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    twig_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Merge made by the three-way strategy: ",
        ));

    assert_eq!(common::read_file(dir.path(), "base.txt"), "base content\n");
    // a path the giver left at base takes the giver's version
    assert_eq!(common::read_file(dir.path(), "left.txt"), "initial\n");
    assert_eq!(
        common::read_file(dir.path(), "right.txt"),
        "initial\nfeature change\n"
    );
    assert_eq!(common::read_file(dir.path(), "src/new.txt"), "brand new\n");
    assert!(!dir.path().join("gone.txt").exists());
    assert!(!dir.path().join(".twig/MERGE_HEAD").exists());

    let merge_commit = common::head_oid(dir.path());
    let output = run_twig_command(dir.path(), &["cat-file", &merge_commit]).output()?;
    let record = String::from_utf8(output.stdout)?;
    assert!(record.contains(&format!("\nparent {}\n", commit_c)));
    assert!(record.ends_with("\n\nMerged feature into master."));

    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit, working tree clean"));

    // feature is now part of master's history
    twig_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout("Already up to date.\n");

    Ok(())
}

/// The receiver edits `y` while the giver only adds `z`
///
/// Expected: the merged `y` carries the giver's content, in the working
/// tree, the index and the merge commit
#[rstest]
fn merge_keeps_giver_content_for_modified_paths(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_twig_command(dir.path(), &["init"]).assert().success();
    write_file(FileSpec::new(dir.path().join("y"), "b".to_string()));
    run_twig_command(dir.path(), &["add", "y"]).assert().success();
    twig_commit(dir.path(), "base").assert().success();
    run_twig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.path().join("y"), "r".to_string()));
    run_twig_command(dir.path(), &["add", "y"]).assert().success();
    twig_commit(dir.path(), "receiver edit").assert().success();

    run_twig_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("z"), "z".to_string()));
    run_twig_command(dir.path(), &["add", "z"]).assert().success();
    twig_commit(dir.path(), "giver addition").assert().success();

    run_twig_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    twig_merge(dir.path(), "feature").assert().success();

    assert_eq!(common::read_file(dir.path(), "y"), "b");
    assert_eq!(common::read_file(dir.path(), "z"), "z");

    let output = run_twig_command(dir.path(), &["ls-index"]).output()?;
    let listing = String::from_utf8(output.stdout)?;
    let giver_blob = run_twig_command(dir.path(), &["hash-object", "y"]).output()?;
    let giver_blob = String::from_utf8(giver_blob.stdout)?;
    assert!(listing.contains(&format!("0 {}\ty\n", giver_blob.trim())));

    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit, working tree clean"));

    Ok(())
}
