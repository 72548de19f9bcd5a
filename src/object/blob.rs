use serde::{Deserialize, Serialize};

use super::{get, put, TAG_BLOB};
use crate::error::Result;
use crate::hash::Id;
use crate::repo::Repo;
use crate::types::Blob;

/// the on-disk encoding of a blob: just path + content, CBOR-encoded.
#[derive(Serialize, Deserialize)]
struct BlobRecord {
    path: String,
    content: Vec<u8>,
}

/// write `blob` to the store, returning its id. A no-op if the blob's id
/// already has an object on disk (content addressing makes this
/// idempotent).
pub fn write_blob(repo: &Repo, blob: &Blob) -> Result<Id> {
    let id = blob.id();
    let record = BlobRecord {
        path: blob.path().to_string_lossy().to_string(),
        content: blob.content().to_vec(),
    };
    let mut cbor = Vec::new();
    ciborium::into_writer(&record, &mut cbor)?;
    put(repo, &id, TAG_BLOB, &cbor)?;
    Ok(id)
}

/// read a blob back by id.
pub fn read_blob(repo: &Repo, id: &Id) -> Result<Blob> {
    let cbor = get(repo, id, TAG_BLOB)?;
    let record: BlobRecord = ciborium::from_reader(&cbor[..])?;
    Ok(Blob::new(record.path.into(), record.content))
}

/// does an object with this id exist and decode as a blob?
pub fn blob_exists(repo: &Repo, id: &Id) -> bool {
    read_blob(repo, id).is_ok()
}
