//! Typed JSON records on top of [`crate::objects`].

use aws_sdk_s3::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::objects;

const JSON: Option<&str> = Some("application/json");

/// Attempts made by [`update_record`] before giving up on a contended key.
pub const UPDATE_ATTEMPTS: usize = 3;

/// Load a JSON record. Returns the deserialized value and its ETag.
pub async fn load_record<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<(T, String), StorageError> {
    let output = objects::get_object(client, bucket, key).await?;
    let value: T = serde_json::from_slice(&output.body)?;
    let etag = output.etag.unwrap_or_default();
    Ok((value, etag))
}

/// Save a JSON record, replacing any existing value. Returns the new ETag.
pub async fn save_record<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object(client, bucket, key, body, JSON).await
}

/// Save a JSON record only if `key` is free. Fails with
/// `StorageError::AlreadyExists` otherwise.
pub async fn create_record<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object_if_absent(client, bucket, key, body, JSON).await
}

/// Read-modify-write a record under ETag optimistic locking, retrying when
/// another writer wins the race. `apply` may run more than once.
pub async fn update_record<T, E, F>(
    client: &Client,
    bucket: &str,
    key: &str,
    mut apply: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    E: From<StorageError>,
    F: FnMut(&mut T) -> Result<(), E>,
{
    let mut attempt = 1;
    loop {
        let (mut value, etag): (T, String) = load_record(client, bucket, key).await?;
        apply(&mut value)?;

        let body = serde_json::to_vec_pretty(&value).map_err(StorageError::from)?;
        match objects::put_object_if_match(client, bucket, key, body, JSON, &etag).await {
            Ok(_) => return Ok(value),
            Err(StorageError::PreconditionFailed { .. }) if attempt < UPDATE_ATTEMPTS => {
                debug!(key, attempt, "record changed underneath update, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Load every record under `prefix`. Keys deleted between listing and
/// reading are skipped.
pub async fn load_all<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = objects::list_objects(client, bucket, prefix).await?;

    let mut records = Vec::with_capacity(keys.len());
    for key in &keys {
        match load_record(client, bucket, key).await {
            Ok((value, _)) => records.push(value),
            Err(StorageError::NotFound { .. }) => {
                warn!(key = %key, "listed record disappeared before read");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(records)
}
