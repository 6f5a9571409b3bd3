use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Initialized repository with one committed file `x` holding `v1`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("x"),
        "v1".to_string(),
    ));
    run_twig_command(repository_dir.path(), &["add", "x"])
        .assert()
        .success();
    twig_commit(repository_dir.path(), "c1").assert().success();

    repository_dir
}

/// Initialized repository with a small nested project committed
#[fixture]
pub fn nested_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_twig_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    twig_commit(repository_dir.path(), "Nested project")
        .assert()
        .success();

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.env("NO_COLOR", "1");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_twig_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("TWIG_AUTHOR_NAME", "fake_user"),
        ("TWIG_AUTHOR_EMAIL", "fake_email@email.com"),
        ("TWIG_AUTHOR_DATE", AUTHOR_DATE), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd
}

pub fn twig_merge(dir: &Path, branch: &str) -> Command {
    let mut cmd = run_twig_command(dir, &["merge", branch]);
    cmd.envs(vec![
        ("TWIG_AUTHOR_NAME", "fake_user"),
        ("TWIG_AUTHOR_EMAIL", "fake_email@email.com"),
        ("TWIG_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd
}

/// Write `content` to `path`, stage it and commit it
pub fn commit_file(dir: &Path, path: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(path), content.to_string()));
    run_twig_command(dir, &["add", path]).assert().success();
    twig_commit(dir, message).assert().success();
}
