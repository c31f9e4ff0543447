use crate::common::command::{
    get_head_commit_oid, get_parent_commit_oid, repository_with_multiple_commits, run_vcs_command,
};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn subjects(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .filter_map(|line| line.split_once(' ').map(|(_, message)| message))
        .collect()
}

#[rstest]
fn show_log_from_middle_of_history(repository_with_multiple_commits: TempDir) {
    let stdout = stdout_of(run_vcs_command(
        repository_with_multiple_commits.path(),
        &["log", "--oneline", "HEAD~2"],
    ));

    assert_eq!(subjects(&stdout), vec!["Second commit", "First commit"]);
}

#[rstest]
fn show_log_from_abbreviated_oid(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits.path();
    let head = get_head_commit_oid(dir)?;
    let parent = get_parent_commit_oid(dir, &head)?;

    let stdout = stdout_of(run_vcs_command(dir, &["log", "--oneline", &parent[..8]]));

    assert_eq!(
        subjects(&stdout),
        vec!["Third commit", "Second commit", "First commit"]
    );

    Ok(())
}

#[rstest]
fn show_log_from_branch_reference(repository_with_multiple_commits: TempDir) {
    let dir = repository_with_multiple_commits.path();

    let stdout = stdout_of(run_vcs_command(dir, &["log", "--oneline", "-n", "1", "main"]));

    assert_eq!(subjects(&stdout), vec!["Fourth commit"]);
}

#[rstest]
fn show_log_from_invalid_revision(repository_with_multiple_commits: TempDir) {
    run_vcs_command(
        repository_with_multiple_commits.path(),
        &["log", "nonexistent"],
    )
    .assert()
    .failure();
}
