use crate::common::command::{
    init_repository_dir, nested_repository_dir, repository_dir, run_twig_command, twig_commit,
};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn ls_index(dir: &std::path::Path) -> String {
    let output = run_twig_command(dir, &["ls-index"])
        .output()
        .expect("Failed to run ls-index");
    String::from_utf8(output.stdout).expect("ls-index output is not UTF-8")
}

#[rstest]
fn add_single_file_to_index_successfully(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_twig_command(dir.path(), &["init"]).assert().success();
    write_file(FileSpec::new(dir.path().join("hello.txt"), "hello".to_string()));

    run_twig_command(dir.path(), &["add", "hello.txt"])
        .assert()
        .success();

    // sha1("hello")
    assert_eq!(
        ls_index(dir.path()),
        "0 aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d\thello.txt\n"
    );

    Ok(())
}

#[rstest]
fn add_files_from_nested_directories(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_twig_command(dir.path(), &["init"]).assert().success();
    write_file(FileSpec::new(dir.path().join("a/b/c.txt"), "c".to_string()));
    write_file(FileSpec::new(dir.path().join("a/d.txt"), "d".to_string()));
    write_file(FileSpec::new(dir.path().join("e.txt"), "e".to_string()));

    run_twig_command(dir.path(), &["add", "a"]).assert().success();

    let paths = ls_index(dir.path())
        .lines()
        .filter_map(|line| line.split_once('\t').map(|(_, path)| path.to_string()))
        .collect::<Vec<_>>();
    assert_eq!(paths, vec!["a/b/c.txt", "a/d.txt"]);

    Ok(())
}

#[rstest]
fn adding_many_generated_files_tracks_all_of_them(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_twig_command(dir.path(), &["init"]).assert().success();
    let files = write_generated_files(dir.path(), 8);

    run_twig_command(dir.path(), &["add", "."]).assert().success();

    assert_eq!(ls_index(dir.path()).lines().count(), files.len());

    Ok(())
}

#[rstest]
fn adding_a_non_existent_file_is_reported_and_skipped(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let before = ls_index(dir.path());

    run_twig_command(dir.path(), &["add", "missing.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "warning: pathspec 'missing.txt' did not match any files",
        ));

    assert_eq!(ls_index(dir.path()), before);
}

#[rstest]
fn adding_an_unchanged_file_twice_is_idempotent(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("y"), "fresh".to_string()));

    run_twig_command(dir.path(), &["add", "y"]).assert().success();
    let index_after_first = std::fs::read(dir.path().join(".twig/index"))?;
    let objects_after_first = common::object_count(dir.path());

    run_twig_command(dir.path(), &["add", "y"]).assert().success();
    let index_after_second = std::fs::read(dir.path().join(".twig/index"))?;

    assert_eq!(index_after_first, index_after_second);
    assert_eq!(objects_after_first, common::object_count(dir.path()));

    Ok(())
}

#[rstest]
fn rm_untracks_and_deletes_files(nested_repository_dir: TempDir) {
    let dir = nested_repository_dir;

    run_twig_command(dir.path(), &["rm", "a"])
        .assert()
        .success()
        .stdout("rm 'a/2.txt'\nrm 'a/b/3.txt'\n");

    assert!(!dir.path().join("a").exists());
    assert!(!ls_index(dir.path()).contains("a/"));

    twig_commit(dir.path(), "drop a").assert().success();

    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit, working tree clean"));
}

#[rstest]
fn rm_of_an_untracked_path_changes_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("loose.txt"), "loose".to_string()));
    let before = ls_index(dir.path());

    run_twig_command(dir.path(), &["rm", "x", "loose.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not match any tracked file"));

    // the tracked path listed first is left alone as well
    assert!(dir.path().join("x").exists());
    assert_eq!(ls_index(dir.path()), before);
}

#[rstest]
fn re_adding_a_removed_path_cancels_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["rm", "x"]).assert().success();
    write_file(FileSpec::new(dir.path().join("x"), "v1".to_string()));
    run_twig_command(dir.path(), &["add", "x"]).assert().success();

    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit, working tree clean"));
}
