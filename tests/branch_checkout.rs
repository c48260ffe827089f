use predicates::prelude::*;

mod common;
use common::GitletRepo;

#[test]
fn branch_creates_a_pointer_without_switching() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "hello\n", "first");
    let head = repo.head_oid();

    repo.run(&["branch", "feature"]).assert().success();

    assert_eq!(repo.read_file(".gitlet/HEAD"), "ref: refs/heads/master");
    assert_eq!(
        repo.read_file(".gitlet/refs/heads/feature").trim(),
        head
    );
}

#[test]
fn branch_refuses_a_duplicate_name() {
    let repo = GitletRepo::initialized();
    repo.run(&["branch", "feature"]).assert().success();

    repo.run(&["branch", "feature"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "A branch with that name already exists.",
        ));
}

#[test]
fn checkout_switches_branches_and_working_trees() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "base\n", "base");
    repo.run(&["branch", "feature"]).assert().success();
    repo.commit_file("b.txt", "master only\n", "add b");

    repo.run(&["checkout", "feature"]).assert().success();

    assert_eq!(repo.read_file(".gitlet/HEAD"), "ref: refs/heads/feature");
    assert_eq!(repo.read_file("a.txt"), "base\n");
    assert!(!repo.file_exists("b.txt"));
}

#[test]
fn checkout_refuses_an_unknown_branch() {
    let repo = GitletRepo::initialized();

    repo.run(&["checkout", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No such branch exists."));
}

#[test]
fn checkout_refuses_the_current_branch() {
    let repo = GitletRepo::initialized();

    repo.run(&["checkout", "master"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "No need to checkout the current branch.",
        ));
}

#[test]
fn checkout_refuses_to_clobber_an_untracked_file() {
    let repo = GitletRepo::initialized();
    repo.run(&["branch", "feature"]).assert().success();
    repo.commit_file("a.txt", "master version\n", "track a on master");

    repo.run(&["checkout", "feature"]).assert().success();
    repo.write_file("a.txt", "untracked local\n");
    repo.run(&["checkout", "master"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "There is an untracked file in the way; delete it or add it first.",
        ));

    // nothing was touched
    assert_eq!(repo.read_file("a.txt"), "untracked local\n");
}

#[test]
fn checkout_file_restores_the_head_version() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "committed\n", "first");

    repo.write_file("a.txt", "scribbled over\n");
    repo.run(&["checkout", "--", "a.txt"]).assert().success();

    assert_eq!(repo.read_file("a.txt"), "committed\n");
}

#[test]
fn checkout_file_accepts_an_abbreviated_commit_id() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "version one\n", "v1");
    let v1 = repo.head_oid();
    repo.commit_file("a.txt", "version two\n", "v2");

    repo.run(&["checkout", &v1[..7], "--", "a.txt"])
        .assert()
        .success();
    assert_eq!(repo.read_file("a.txt"), "version one\n");
}

#[test]
fn checkout_file_refuses_an_unknown_commit() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "hello\n", "first");

    repo.run(&["checkout", "deadbeef", "--", "a.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No commit with that id exists."));
}

#[test]
fn checkout_file_refuses_a_path_the_commit_does_not_track() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "hello\n", "first");

    repo.run(&["checkout", &repo.head_oid(), "--", "b.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "File does not exist in that commit.",
        ));
}

#[test]
fn checkout_file_form_reports_an_unknown_path_as_missing_from_the_commit() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "hello\n", "first");

    // `-- <file>` is the file form even when the path is not tracked
    repo.run(&["checkout", "--", "ghost.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "File does not exist in that commit.",
        ));
}

#[test]
fn lone_operand_is_always_a_branch_even_when_a_tracked_file_shares_the_name() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "committed\n", "first");
    repo.write_file("a.txt", "local edit\n");

    repo.run(&["checkout", "a.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No such branch exists."));

    // the working copy must not have been restored
    assert_eq!(repo.read_file("a.txt"), "local edit\n");
}

#[test]
fn rm_branch_deletes_only_the_pointer() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "hello\n", "first");
    let head = repo.head_oid();
    repo.run(&["branch", "feature"]).assert().success();

    repo.run(&["rm-branch", "feature"]).assert().success();

    assert!(!repo.path().join(".gitlet/refs/heads/feature").exists());
    // the commit itself is untouched
    repo.run(&["checkout", &head, "--", "a.txt"])
        .assert()
        .success();
}

#[test]
fn rm_branch_refuses_the_current_branch() {
    let repo = GitletRepo::initialized();

    repo.run(&["rm-branch", "master"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Cannot remove the current branch.",
        ));
}

#[test]
fn rm_branch_refuses_an_unknown_branch() {
    let repo = GitletRepo::initialized();

    repo.run(&["rm-branch", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}
