use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::{Error, Result};

/// content-addressed identity: hex digest of a SHA-1 hash, at least 40 characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id([u8; 20]);

impl Id {
    /// parse a full 40-character hex id
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidId(s.to_string()))?;
        if bytes.len() != 20 {
            return Err(Error::InvalidId(s.to_string()));
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    pub fn from_digest(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// short (7-char) form, used in merge-commit log entries
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }

    /// split into the object store's shard components: (first 2 hex chars, remainder)
    pub fn to_path_components(&self) -> (String, String) {
        let hex = self.to_hex();
        (hex[..2].to_string(), hex[2..].to_string())
    }

    fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.short())
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// blob identity: hash of (source path, content bytes).
///
/// mixing the path in means two files with identical bytes at different
/// paths get distinct blob ids; see SPEC_FULL's note on this open question.
pub fn compute_blob_id(path: &Path, content: &[u8]) -> Id {
    let mut hasher = Sha1::new();
    let path_bytes = path.to_string_lossy();
    hasher.update((path_bytes.len() as u32).to_le_bytes());
    hasher.update(path_bytes.as_bytes());
    hasher.update(content);
    Id(hasher.finalize().into())
}

/// commit identity: hash of the commit's logical fields, not its storage encoding.
///
/// `tracked` must already be in a stable (sorted) iteration order.
pub fn compute_commit_id<'a>(
    formatted_timestamp: &str,
    message: &str,
    parents: &[Id],
    tracked: impl Iterator<Item = (&'a str, &'a Id)>,
) -> Id {
    let mut hasher = Sha1::new();
    hasher.update(formatted_timestamp.as_bytes());
    hasher.update(message.as_bytes());
    for parent in parents {
        hasher.update(parent.as_bytes());
    }
    for (path, id) in tracked {
        hasher.update(path.as_bytes());
        hasher.update(id.as_bytes());
    }
    Id(hasher.finalize().into())
}
