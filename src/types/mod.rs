mod blob;
mod commit;

pub use blob::Blob;
pub use commit::{format_timestamp, Commit};
