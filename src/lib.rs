//! gitlet - a self-contained, single-user version-control engine
//!
//! a content-addressed object store (blobs and commits, SHA-1 keyed) plus a
//! staging area, branch refs, and a repository engine implementing the usual
//! init/add/commit/log/status/checkout/branch/reset/merge operations over a
//! single working directory. no networking, no remotes, no sub-directory
//! tracking.
//!
//! # Core concepts
//!
//! - **Blob**: content-addressed file data (CBOR + zstd)
//! - **Commit**: an immutable snapshot of tracked paths, with parents and a
//!   message (CBOR + zstd)
//! - **Ref**: a named pointer to a commit (`refs/heads/<branch>`)
//! - **Staging area**: the added/removed sets a commit is built from
//!
//! # Example usage
//!
//! ```no_run
//! use gitlet::{ops, Repo};
//! use std::path::Path;
//!
//! let repo = Repo::init(Path::new("/path/to/repo")).unwrap();
//! ops::add(&repo, "hello.txt").unwrap();
//! ops::commit(&repo, "initial commit").unwrap();
//! ```

mod error;
mod hash;
mod object;
mod refs;
mod repo;
mod staging;

pub mod ops;
pub mod types;

pub use error::{Error, Result};
pub use hash::Id;
pub use object::{blob_exists, commit_exists, read_blob, read_commit, write_blob, write_commit};
pub use refs::{
    branch_exists, branch_tip, current_branch, delete_branch, head_commit_id, list_branches,
    set_branch_tip, set_current_branch,
};
pub use repo::Repo;
pub use staging::StagingArea;
pub use types::{format_timestamp, Blob, Commit};
