use crate::common::command::{repository_with_multiple_commits, run_vcs_command, vcs_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn show_name_status_for_added_files_between_commits(repository_with_multiple_commits: TempDir) {
    run_vcs_command(
        repository_with_multiple_commits.path(),
        &["diff", "--name-status", "HEAD~2", "HEAD"],
    )
    .assert()
    .success()
    .stdout("A\tfile3.txt\nA\tfile4.txt\n");

    run_vcs_command(
        repository_with_multiple_commits.path(),
        &["diff", "--name-status", "HEAD", "HEAD~2"],
    )
    .assert()
    .success()
    .stdout("D\tfile3.txt\nD\tfile4.txt\n");
}

#[rstest]
fn show_full_patch_between_commits(repository_with_multiple_commits: TempDir) {
    let dir = repository_with_multiple_commits.path();
    write_file(FileSpec::new(
        dir.join("file1.txt"),
        "content one".to_string(),
    ));
    run_vcs_command(dir, &["add", "."]).assert().success();
    vcs_commit(dir, "Fifth commit").assert().success();

    run_vcs_command(dir, &["diff", "HEAD^", "HEAD"])
        .assert()
        .success()
        .stdout(
            "diff --vcs a/file1.txt b/file1.txt\n\
             --- a/file1.txt\n\
             +++ b/file1.txt\n\
             -content 1\n\
             +content one\n",
        );

    run_vcs_command(dir, &["diff", "--diff-filter=A", "HEAD^", "HEAD"])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn diff_with_a_single_revision_fails(repository_with_multiple_commits: TempDir) {
    run_vcs_command(repository_with_multiple_commits.path(), &["diff", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly two"));
}
