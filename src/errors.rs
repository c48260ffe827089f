use thiserror::Error;

/// Closed set of user-facing failures. The `Display` string of each variant
/// is the exact line the CLI prints, so callers must not rewrap or rewrite
/// these messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GitletError {
    #[error("Not in an initialized gitlet directory.")]
    NotARepository,
    #[error("A gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    FileNotExist,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("No reason to remove the file.")]
    NoReasonToRemove,
    #[error("A branch with that name does not exist.")]
    NoSuchBranch,
    // checkout historically words this one differently
    #[error("No such branch exists.")]
    NoSuchBranchToCheckout,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,
    #[error("No need to checkout the current branch.")]
    NoNeedToCheckout,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("There is an untracked file in the way; delete it or add it first.")]
    UntrackedFileConflict,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
    #[error("Found no commit with that message.")]
    NotFound,
}
