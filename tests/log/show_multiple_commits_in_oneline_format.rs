use crate::common::command::{repository_with_multiple_commits, run_vcs_command};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_multiple_commits_in_oneline_format(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = stdout_of(run_vcs_command(
        repository_with_multiple_commits.path(),
        &["log", "--oneline"],
    ));

    let lines = stdout.lines().collect::<Vec<_>>();
    let messages = lines
        .iter()
        .map(|line| line.split_once(' ').map(|(_, message)| message))
        .collect::<Vec<_>>();

    assert_eq!(
        messages,
        vec![
            Some("Fourth commit"),
            Some("Third commit"),
            Some("Second commit"),
            Some("First commit"),
        ]
    );
    for line in lines {
        let short = line.split(' ').next().ok_or("empty log line")?;
        assert_eq!(short.len(), 7);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
    }

    Ok(())
}
