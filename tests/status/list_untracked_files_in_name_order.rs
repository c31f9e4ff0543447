use crate::common::command::{init_repository_dir, repository_dir, run_vcs_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn list_untracked_files_in_name_order(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join("new.txt"),
        "new".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("c").join("4.txt"),
        "four".to_string(),
    ));

    run_vcs_command(init_repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("?? c/4.txt\n?? new.txt\n");
}

#[rstest]
fn list_files_as_untracked_before_the_first_commit(repository_dir: TempDir) {
    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));

    run_vcs_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout("On branch main\n\nChanges in working tree:\n\tnew:      1.txt\n");
}

#[rstest]
fn hidden_and_ignored_files_are_not_listed(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join(".vcsignore"),
        "*.tmp\n".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("scratch.tmp"),
        "scratch".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join(".env"),
        "SECRET=1".to_string(),
    ));

    run_vcs_command(init_repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("");
}
