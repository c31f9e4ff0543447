use crate::common::command::{repository_dir, run_vcs_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn hash_blob_without_writing(repository_dir: TempDir) {
    write_file(FileSpec::new(
        repository_dir.path().join("hello.txt"),
        "hello world\n".to_string(),
    ));

    run_vcs_command(repository_dir.path(), &["hash-object", "hello.txt"])
        .assert()
        .success()
        .stdout("3b18e512dba79e4c8300dd08aeb37f8e728b8dad\n");

    assert!(!repository_dir.path().join(".vcs").exists());
}

#[rstest]
fn hashing_a_missing_file_fails(repository_dir: TempDir) {
    run_vcs_command(repository_dir.path(), &["hash-object", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to read missing.txt"));
}
