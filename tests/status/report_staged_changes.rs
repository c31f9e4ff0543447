use crate::common::command::{init_repository_dir, run_vcs_command};
use crate::common::file::{FileSpec, delete_path, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn report_staged_changes_in_porcelain_format(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "modified one".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("4.txt"),
        "four".to_string(),
    ));

    run_vcs_command(init_repository_dir.path(), &["add", "1.txt", "4.txt"])
        .assert()
        .success();

    run_vcs_command(init_repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("M  1.txt\nA  4.txt\n");
}

#[rstest]
fn report_staged_and_working_tree_changes(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "modified one".to_string(),
    ));
    run_vcs_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    write_file(FileSpec::new(
        init_repository_dir.path().join("new.txt"),
        "new".to_string(),
    ));
    delete_path(&init_repository_dir.path().join("a").join("2.txt"));

    run_vcs_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "On branch main\n\
             \n\
             Changes to be committed:\n\
             \tmodified: 1.txt\n\
             \n\
             Changes in working tree:\n\
             \tdeleted:  a/2.txt\n\
             \tnew:      new.txt\n",
        );
}
