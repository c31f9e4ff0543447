use crate::common::command::{
    get_head_commit_oid, get_parent_commit_oid, init_repository_dir, run_vcs_command, vcs_commit,
};
use crate::common::file::{FileSpec, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn second_commit_points_at_the_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let first = get_head_commit_oid(init_repository_dir.path())?;

    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "modified one".to_string(),
    ));
    run_vcs_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    let stdout = stdout_of(vcs_commit(init_repository_dir.path(), "Second commit"));
    let second = get_head_commit_oid(init_repository_dir.path())?;

    assert_eq!(stdout, format!("[main {}] Second commit\n", &second[..7]));
    assert_eq!(get_parent_commit_oid(init_repository_dir.path(), &second)?, first);

    let listing = stdout_of(run_vcs_command(
        init_repository_dir.path(),
        &["ls-tree", "-r", "HEAD"],
    ));
    assert_eq!(
        listing,
        "100644 blob ba9bbbafaeeb76a9072f45aec4577bb948f65e27\t1.txt\n\
         100644 blob 64c5e5885a4b06010b3a0c20edb7900dd0311025\ta/2.txt\n\
         100644 blob 1d19714ffbc272ba0da6eb419d66123c20527174\ta/b/3.txt\n"
    );

    Ok(())
}

#[rstest]
fn commit_snapshots_only_the_staged_paths(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "modified one".to_string(),
    ));
    run_vcs_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    vcs_commit(init_repository_dir.path(), "Only one file")
        .assert()
        .success();

    let listing = stdout_of(run_vcs_command(
        init_repository_dir.path(),
        &["ls-tree", "-r", "HEAD"],
    ));
    assert_eq!(
        listing,
        "100644 blob ba9bbbafaeeb76a9072f45aec4577bb948f65e27\t1.txt\n"
    );

    Ok(())
}
