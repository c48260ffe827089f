use predicates::prelude::*;
use pretty_assertions::assert_eq;

mod common;
use common::GitletRepo;

#[test]
fn merge_refuses_with_an_untracked_file_present() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "base\n", "base");
    repo.run(&["branch", "other"]).assert().success();
    repo.write_file("loose.txt", "untracked\n");

    repo.run(&["merge", "other"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "There is an untracked file in the way; delete it or add it first.",
        ));
}

#[test]
fn merge_refuses_with_staged_changes_present() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "base\n", "base");
    repo.run(&["branch", "other"]).assert().success();
    repo.write_file("a.txt", "pending\n");
    repo.run(&["add", "a.txt"]).assert().success();

    repo.run(&["merge", "other"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("You have uncommitted changes."));
}

#[test]
fn merge_refuses_an_unknown_branch() {
    let repo = GitletRepo::initialized();

    repo.run(&["merge", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}

#[test]
fn merge_refuses_the_current_branch() {
    let repo = GitletRepo::initialized();

    repo.run(&["merge", "master"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Cannot merge a branch with itself.",
        ));
}

#[test]
fn merging_an_ancestor_is_a_no_op() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "base\n", "base");
    repo.run(&["branch", "other"]).assert().success();
    repo.commit_file("a.txt", "ahead\n", "move master ahead");
    let head = repo.head_oid();

    repo.run(&["merge", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Given branch is an ancestor of the current branch.",
        ));
    assert_eq!(repo.head_oid(), head);
}

#[test]
fn merging_a_descendant_fast_forwards() {
    let repo = GitletRepo::initialized();
    repo.commit_file("a.txt", "base\n", "base");
    repo.run(&["branch", "other"]).assert().success();
    repo.run(&["checkout", "other"]).assert().success();
    repo.commit_file("b.txt", "ahead\n", "move other ahead");
    let other_tip = repo.head_oid();
    repo.run(&["checkout", "master"]).assert().success();

    repo.run(&["merge", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch fast-forwarded."));

    assert_eq!(repo.head_oid(), other_tip);
    assert_eq!(repo.read_file("b.txt"), "ahead\n");
    assert_eq!(repo.read_file(".gitlet/HEAD"), "ref: refs/heads/master");
}

#[test]
fn clean_merge_combines_both_sides_in_a_two_parent_commit() {
    let repo = GitletRepo::initialized();
    repo.commit_file("base.txt", "base\n", "base");
    repo.run(&["branch", "other"]).assert().success();

    repo.commit_file("ours.txt", "ours\n", "add ours");
    let master_tip = repo.head_oid();

    repo.run(&["checkout", "other"]).assert().success();
    repo.commit_file("theirs.txt", "theirs\n", "add theirs");
    let other_tip = repo.head_oid();

    repo.run(&["checkout", "master"]).assert().success();
    repo.run(&["merge", "other"]).assert().success();

    assert_eq!(repo.read_file("base.txt"), "base\n");
    assert_eq!(repo.read_file("ours.txt"), "ours\n");
    assert_eq!(repo.read_file("theirs.txt"), "theirs\n");

    repo.run(&["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged other into master."))
        .stdout(predicate::str::contains(format!(
            "Merge: {} {}",
            &master_tip[..7],
            &other_tip[..7]
        )));
}

#[test]
fn merge_takes_the_given_side_when_only_it_changed() {
    let repo = GitletRepo::initialized();
    repo.commit_file("shared.txt", "base\n", "base");
    repo.run(&["branch", "other"]).assert().success();

    // diverge master with an unrelated file so no fast-forward happens
    repo.commit_file("unrelated.txt", "noise\n", "unrelated");

    repo.run(&["checkout", "other"]).assert().success();
    repo.commit_file("shared.txt", "given version\n", "edit shared");
    repo.run(&["checkout", "master"]).assert().success();

    repo.run(&["merge", "other"]).assert().success();

    assert_eq!(repo.read_file("shared.txt"), "given version\n");
}

#[test]
fn merge_deletes_what_the_given_branch_removed() {
    let repo = GitletRepo::initialized();
    repo.commit_file("doomed.txt", "base\n", "base");
    repo.run(&["branch", "other"]).assert().success();

    repo.commit_file("unrelated.txt", "noise\n", "unrelated");

    repo.run(&["checkout", "other"]).assert().success();
    repo.run(&["rm", "doomed.txt"]).assert().success();
    repo.run(&["commit", "drop doomed"]).assert().success();
    repo.run(&["checkout", "master"]).assert().success();

    repo.run(&["merge", "other"]).assert().success();

    assert!(!repo.file_exists("doomed.txt"));
}

#[test]
fn conflicting_edits_produce_exact_markers_and_no_commit() {
    let repo = GitletRepo::initialized();
    repo.commit_file("f.txt", "base\n", "base");
    repo.run(&["branch", "other"]).assert().success();

    repo.commit_file("f.txt", "master line\n", "edit on master");
    let master_tip = repo.head_oid();

    repo.run(&["checkout", "other"]).assert().success();
    repo.commit_file("f.txt", "other line\n", "edit on other");
    repo.run(&["checkout", "master"]).assert().success();

    repo.run(&["merge", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    assert_eq!(
        repo.read_file("f.txt"),
        "<<<<<<< HEAD\nmaster line\n=======\nother line\n>>>>>>>\n"
    );
    // no merge commit was created
    assert_eq!(repo.head_oid(), master_tip);
}

#[test]
fn conflict_with_a_deleted_side_keeps_only_the_surviving_half() {
    let repo = GitletRepo::initialized();
    repo.commit_file("f.txt", "base\n", "base");
    repo.run(&["branch", "other"]).assert().success();

    repo.commit_file("f.txt", "master line\n", "edit on master");

    repo.run(&["checkout", "other"]).assert().success();
    repo.run(&["rm", "f.txt"]).assert().success();
    repo.run(&["commit", "drop f"]).assert().success();
    repo.run(&["checkout", "master"]).assert().success();

    repo.run(&["merge", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    assert_eq!(
        repo.read_file("f.txt"),
        "<<<<<<< HEAD\nmaster line\n=======\n>>>>>>>\n"
    );
}
