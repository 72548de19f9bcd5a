use std::path::PathBuf;

/// the closed set of domain error conditions, one per row of the error
/// taxonomy; each `Display` impl renders exactly the user-visible message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Please enter a command.")]
    NoCommand,

    #[error("No command with that name exists.")]
    UnknownCommand,

    #[error("Incorrect operands.")]
    BadOperands,

    #[error("Please enter a commit message.")]
    EmptyCommitMessage,

    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileMissing,

    #[error("No changes added to the commit.")]
    NoChanges,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Found no commit with that message.")]
    NoSuchMessage,

    #[error("File does not exist in that commit.")]
    NotInCommit,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("Commit id should contain at least 4 characters.")]
    ShortId,

    #[error("More than 1 commit has the same id prefix.")]
    AmbiguousId,

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedOverwrite,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    #[error("invalid hash id: {0}")]
    InvalidId(String),

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("corrupt object: {0}")]
    CorruptObject(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] ciborium::ser::Error<std::io::Error>),

    #[error("deserialization error: {0}")]
    Deserialize(#[from] ciborium::de::Error<std::io::Error>),
}

pub type Result<T> = std::result::Result<T, Error>;

/// attach a path to an `io::Error`, turning it into `Error::Io`.
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
