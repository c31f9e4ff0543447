use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
pub const AUTHOR_DATE: &str = "Tue, 10 Jan 2023 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with `1.txt`, `a/2.txt` and `a/b/3.txt` committed on `main`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_vcs_command(repository_dir.path(), &["init"])
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

    run_vcs_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    vcs_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

/// Repository with four commits, each adding `file<n>.txt`
#[fixture]
pub fn repository_with_multiple_commits(repository_dir: TempDir) -> TempDir {
    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for (index, message) in ["First", "Second", "Third", "Fourth"].iter().enumerate() {
        let number = index + 1;
        write_file(FileSpec::new(
            repository_dir.path().join(format!("file{number}.txt")),
            format!("content {number}"),
        ));

        run_vcs_command(repository_dir.path(), &["add", "."])
            .assert()
            .success();
        vcs_commit(repository_dir.path(), &format!("{message} commit"))
            .assert()
            .success();
    }

    repository_dir
}

pub fn run_vcs_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("vcs").expect("Failed to find vcs binary");
    cmd.envs(vec![
        ("NO_COLOR", "1"),
        ("VCS_AUTHOR_NAME", AUTHOR_NAME),
        ("VCS_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("VCS_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn vcs_commit(dir: &Path, message: &str) -> Command {
    run_vcs_command(dir, &["commit", "-m", message])
}

/// Tip of the branch HEAD points at
pub fn get_head_commit_oid(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(dir.join(".vcs").join("HEAD"))?;
    let ref_path = head_content
        .trim()
        .strip_prefix("ref: ")
        .ok_or("HEAD is not a symbolic reference")?;

    let commit_oid = std::fs::read_to_string(dir.join(".vcs").join(ref_path))?;
    Ok(commit_oid.trim().to_string())
}

/// Parent of a commit, read through `cat-file -p`
pub fn get_parent_commit_oid(
    dir: &Path,
    commit_oid: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_vcs_command(dir, &["cat-file", "-p", commit_oid]).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    for line in stdout.lines() {
        if let Some(oid) = line.strip_prefix("parent ") {
            return Ok(oid.to_string());
        }
    }

    Err("No parent found".into())
}
