use crate::common::command::{repository_dir, run_vcs_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir.path().canonicalize()?.display().to_string();
    let target = repository_dir.path().join("project");

    run_vcs_command(repository_dir.path(), &["init", "project"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty repository in .+\.vcs\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    let control = target.join(".vcs");
    assert_eq!(
        std::fs::read_to_string(control.join("HEAD"))?,
        "ref: refs/heads/main\n"
    );
    assert_eq!(
        std::fs::read_to_string(control.join("refs").join("heads").join("main"))?,
        ""
    );
    assert!(control.join("objects").is_dir());
    assert!(control.join("index").is_file());

    Ok(())
}

#[rstest]
fn init_defaults_to_current_directory(repository_dir: TempDir) {
    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    assert!(repository_dir.path().join(".vcs").join("HEAD").is_file());
}
