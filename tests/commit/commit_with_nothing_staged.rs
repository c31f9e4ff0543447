use crate::common::command::{get_head_commit_oid, init_repository_dir, vcs_commit};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_with_nothing_staged_keeps_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let head = get_head_commit_oid(init_repository_dir.path())?;

    vcs_commit(init_repository_dir.path(), "Nothing here")
        .assert()
        .success()
        .stdout("No changes to commit\n");

    assert_eq!(get_head_commit_oid(init_repository_dir.path())?, head);

    Ok(())
}
