use crate::common::command::{repository_dir, run_vcs_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn write_blob_object_successfully(repository_dir: TempDir) {
    let oid = "3b18e512dba79e4c8300dd08aeb37f8e728b8dad";

    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("hello.txt"),
        "hello world\n".to_string(),
    ));

    run_vcs_command(repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success()
        .stdout(format!("{oid}\n"));

    let object_path = repository_dir
        .path()
        .join(".vcs")
        .join("objects")
        .join(&oid[..2])
        .join(&oid[2..]);
    assert!(object_path.is_file());

    run_vcs_command(repository_dir.path(), &["cat-file", "-p", oid])
        .assert()
        .success()
        .stdout("hello world\n");

    run_vcs_command(repository_dir.path(), &["cat-file", "-t", &oid[..7]])
        .assert()
        .success()
        .stdout("blob\n");
}
