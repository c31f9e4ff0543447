use crate::common::command::{repository_dir, run_vcs_command};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_multiple_files_to_index_incrementally(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let files = write_generated_files(repository_dir.path(), 4);
    for file in &files {
        let name = file
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or("generated file has no name")?;

        run_vcs_command(repository_dir.path(), &["add", name])
            .assert()
            .success();
    }

    let index = std::fs::read_to_string(repository_dir.path().join(".vcs").join("index"))?;
    let mut expected = files
        .iter()
        .filter_map(|file| file.path.file_name()?.to_str().map(str::to_string))
        .collect::<Vec<_>>();
    expected.sort();

    let staged = index
        .lines()
        .filter_map(|line| line.rsplit_once(':').map(|(path, _)| path.to_string()))
        .collect::<Vec<_>>();

    assert_eq!(staged, expected);

    Ok(())
}
