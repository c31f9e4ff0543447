use crate::common::command::{repository_dir, run_vcs_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn removing_a_directory_drops_nested_records(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_vcs_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    run_vcs_command(repository_dir.path(), &["rm", "a"])
        .assert()
        .success()
        .stdout("rm 'a'\n");

    let index = std::fs::read_to_string(repository_dir.path().join(".vcs").join("index"))?;
    assert_eq!(index, "1.txt:43dd47ea691c90a5fa7827892c70241913351963\n");

    // the file itself stays on disk
    assert!(repository_dir.path().join("a").join("b").join("3.txt").is_file());

    Ok(())
}

#[rstest]
fn removing_an_unstaged_path_changes_nothing(repository_dir: TempDir) {
    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_vcs_command(repository_dir.path(), &["rm", "never-added.txt"])
        .assert()
        .success()
        .stdout("");
}
