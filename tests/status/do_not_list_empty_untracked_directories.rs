use crate::common::command::{init_repository_dir, run_vcs_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn do_not_list_empty_untracked_directories(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(init_repository_dir.path().join("empty").join("nested"))?;

    run_vcs_command(init_repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("");

    Ok(())
}
