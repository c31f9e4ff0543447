use crate::common::command::{get_head_commit_oid, init_repository_dir, run_vcs_command};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_tree_creates_commit_and_moves_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let parent = get_head_commit_oid(dir)?;

    let commit = stdout_of(run_vcs_command(dir, &["cat-file", "-p", "HEAD"]));
    let tree = commit
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("tree "))
        .ok_or("commit does not start with a tree line")?
        .to_string();

    let oid = stdout_of(run_vcs_command(
        dir,
        &["commit-tree", &tree, "-p", "HEAD", "-m", "Same tree again"],
    ));
    let oid = oid.trim();

    assert_eq!(get_head_commit_oid(dir)?, oid);
    run_vcs_command(dir, &["cat-file", "-t", oid])
        .assert()
        .success()
        .stdout("commit\n");

    let payload = stdout_of(run_vcs_command(dir, &["cat-file", "-p", oid]));
    assert!(payload.contains(&format!("tree {tree}\nparent {parent}\n")));
    assert!(payload.ends_with("\n\nSame tree again"));

    Ok(())
}

#[rstest]
fn commit_tree_rejects_non_tree_objects(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_oid(dir)?;

    run_vcs_command(dir, &["commit-tree", &head, "-m", "Not a tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a tree"));

    assert_eq!(get_head_commit_oid(dir)?, head);

    Ok(())
}
