use crate::common::command::{init_repository_dir, run_vcs_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case(".hidden")]
#[case("ends.lock")]
#[case("double..dot")]
#[case("with space")]
#[case("trailing/")]
fn create_branch_with_invalid_name(init_repository_dir: TempDir, #[case] name: &str) {
    run_vcs_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));
}
