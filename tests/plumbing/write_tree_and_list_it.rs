use crate::common::command::{repository_dir, run_vcs_command};
use crate::common::file::{FileSpec, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn write_tree_and_list_it(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_vcs_command(dir, &["init"]).assert().success();

    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.join("a").join("2.txt"), "two".to_string()));
    run_vcs_command(dir, &["add", "."]).assert().success();

    let tree = stdout_of(run_vcs_command(dir, &["write-tree"]));
    let tree = tree.trim();
    assert_eq!(tree.len(), 40);

    // writing the same index twice yields the same tree
    let again = stdout_of(run_vcs_command(dir, &["write-tree"]));
    assert_eq!(again.trim(), tree);

    let listing = stdout_of(run_vcs_command(dir, &["ls-tree", tree]));
    let lines = listing.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "100644 blob 43dd47ea691c90a5fa7827892c70241913351963\t1.txt"
    );
    assert!(lines[1].starts_with("040000 tree "));
    assert!(lines[1].ends_with("\ta"));

    let recursive = stdout_of(run_vcs_command(dir, &["ls-tree", "-r", tree]));
    assert_eq!(
        recursive,
        "100644 blob 43dd47ea691c90a5fa7827892c70241913351963\t1.txt\n\
         100644 blob 64c5e5885a4b06010b3a0c20edb7900dd0311025\ta/2.txt\n"
    );

    // write-tree does not touch the branch or the index
    let main = std::fs::read_to_string(dir.join(".vcs").join("refs").join("heads").join("main"))?;
    assert!(main.is_empty());

    Ok(())
}

#[rstest]
fn write_tree_of_empty_index_is_the_empty_tree(repository_dir: TempDir) {
    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_vcs_command(repository_dir.path(), &["write-tree"])
        .assert()
        .success()
        .stdout("4b825dc642cb6eb9a060e54bf8d69288fbee4904\n");
}
