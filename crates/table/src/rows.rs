//! Row operations: insert, get, delete, scan

use crate::error::TableError;
use crate::key::RowKey;
use crate::policy::{OverwritePolicy, Presence};
use serde::de::DeserializeOwned;
use serde::Serialize;
use simpleapp_shim::ChaincodeStub;

/// Write `value` under `key`, subject to `policy`.
///
/// Returns the previous value if a row was present.
pub fn insert<T>(
    stub: &mut dyn ChaincodeStub,
    key: &RowKey,
    value: &T,
    policy: OverwritePolicy,
) -> Result<Option<T>, TableError>
where
    T: Serialize + DeserializeOwned,
{
    let encoded = row_key(key)?;
    let existing = stub.get_state(&encoded)?;

    if !policy.permits(existing.is_some()) {
        tracing::debug!(key = %encoded, %policy, "Insert rejected by overwrite policy");
        return Err(match policy {
            OverwritePolicy::FailBeforeOverwrite => TableError::AlreadyExists { key: encoded },
            _ => TableError::NotFound { key: encoded },
        });
    }

    let previous = existing
        .map(|bytes| decode::<T>(&encoded, &bytes))
        .transpose()?;
    let bytes = serde_json::to_vec(value).map_err(|source| TableError::Serialization {
        key: encoded.clone(),
        source,
    })?;

    stub.put_state(&encoded, bytes)?;
    tracing::debug!(key = %encoded, %policy, overwrote = previous.is_some(), "Row written");

    Ok(previous)
}

/// Read the row under `key`
pub fn get<T>(
    stub: &dyn ChaincodeStub,
    key: &RowKey,
    presence: Presence,
) -> Result<Option<T>, TableError>
where
    T: DeserializeOwned,
{
    let encoded = row_key(key)?;
    match stub.get_state(&encoded)? {
        Some(bytes) => decode(&encoded, &bytes).map(Some),
        None => missing(encoded, presence),
    }
}

/// Remove the row under `key`, returning the removed value
pub fn delete<T>(
    stub: &mut dyn ChaincodeStub,
    key: &RowKey,
    presence: Presence,
) -> Result<Option<T>, TableError>
where
    T: DeserializeOwned,
{
    let encoded = row_key(key)?;
    let Some(bytes) = stub.get_state(&encoded)? else {
        return missing(encoded, presence);
    };

    let previous = decode(&encoded, &bytes)?;
    stub.del_state(&encoded)?;
    tracing::debug!(key = %encoded, "Row deleted");

    Ok(Some(previous))
}

/// Decoded value of every row whose key extends `prefix`.
///
/// Lazy; order is whatever the host's range query yields. A row that fails
/// to decode is reported under its own key.
pub fn scan<'a, T>(
    stub: &'a dyn ChaincodeStub,
    prefix: &RowKey,
) -> Result<impl Iterator<Item = Result<T, TableError>> + 'a, TableError>
where
    T: DeserializeOwned + 'a,
{
    let start = prefix.encode();
    let end = prefix.range_end();
    tracing::debug!(%start, %end, "Scanning rows");

    let rows = stub.get_state_by_range(&start, &end)?;
    Ok(rows.map(|entry| {
        let kv = entry?;
        decode(&kv.key, &kv.value)
    }))
}

fn row_key(key: &RowKey) -> Result<String, TableError> {
    if key.parts().is_empty() {
        return Err(TableError::InvalidKey(format!(
            "row key for table {:?} needs at least one part",
            key.table()
        )));
    }
    Ok(key.encode())
}

fn missing<T>(key: String, presence: Presence) -> Result<Option<T>, TableError> {
    match presence {
        Presence::FailIfMissing => Err(TableError::NotFound { key }),
        Presence::AllowMissing => Ok(None),
    }
}

fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T, TableError> {
    serde_json::from_slice(bytes).map_err(|source| TableError::Serialization {
        key: key.to_string(),
        source,
    })
}
