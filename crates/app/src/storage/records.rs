//! Versioned records.
//!
//! Records are stored as `{ "version": <n>, "data": <record> }`. Values written
//! before the envelope existed are handed to [`StoredRecord::from_legacy`].

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::storage::{KeyValueStore, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordVersion {
    V1,
}

impl RecordVersion {
    pub const CURRENT: Self = Self::V1;

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::V1),
            _ => None,
        }
    }
}

/// A value that lives in a single storage slot.
pub trait StoredRecord: Serialize + DeserializeOwned {
    /// Slot the record is stored under.
    const KEY: &'static str;

    /// Migrate a value written without a version envelope.
    fn from_legacy(_raw: &str) -> Option<Self> {
        None
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u64,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    version: u64,
    data: Value,
}

/// Read and decode the record stored in `T`'s slot.
///
/// # Errors
///
/// Returns a [`StorageError`] when the slot cannot be read, carries an unknown
/// schema version, or holds something that is neither an envelope nor a
/// migratable legacy value.
pub fn read_record<T: StoredRecord>(store: &dyn KeyValueStore) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(T::KEY)? else {
        return Ok(None);
    };

    decode(&raw).map(Some)
}

/// Encode `record` in the current envelope and overwrite its slot.
///
/// # Errors
///
/// Returns a [`StorageError`] when encoding or the write fails.
pub fn write_record<T: StoredRecord>(
    store: &dyn KeyValueStore,
    record: &T,
) -> Result<(), StorageError> {
    let envelope = EnvelopeRef {
        version: RecordVersion::CURRENT.as_u64(),
        data: record,
    };

    let encoded = serde_json::to_string(&envelope)
        .map_err(|source| StorageError::Encode { key: T::KEY, source })?;

    store.set(T::KEY, &encoded)
}

/// Clear `T`'s slot.
///
/// # Errors
///
/// Returns a [`StorageError`] when the delete fails.
pub fn remove_record<T: StoredRecord>(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store.remove(T::KEY)
}

fn decode<T: StoredRecord>(raw: &str) -> Result<T, StorageError> {
    let Ok(Envelope { version, data }) = serde_json::from_str::<Envelope>(raw) else {
        return T::from_legacy(raw).ok_or(StorageError::Unrecognised { key: T::KEY });
    };

    match RecordVersion::from_u64(version) {
        Some(RecordVersion::V1) => serde_json::from_value(data)
            .map_err(|source| StorageError::Malformed { key: T::KEY, source }),
        None => Err(StorageError::UnsupportedVersion {
            key: T::KEY,
            found: version,
        }),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStore;

    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    impl StoredRecord for Note {
        const KEY: &'static str = "note";

        fn from_legacy(raw: &str) -> Option<Self> {
            (!raw.trim().is_empty()).then(|| Self {
                text: raw.trim().to_string(),
            })
        }
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    impl StoredRecord for Counter {
        const KEY: &'static str = "counter";
    }

    #[test]
    fn written_records_carry_version_envelope() -> TestResult {
        let store = MemoryStore::new();

        write_record(
            &store,
            &Note {
                text: "hello".to_string(),
            },
        )?;

        let raw: Value = serde_json::from_str(&store.get("note")?.unwrap_or_default())?;

        assert_eq!(raw, serde_json::json!({ "version": 1, "data": { "text": "hello" } }));

        Ok(())
    }

    #[test]
    fn read_returns_written_record() -> TestResult {
        let store = MemoryStore::new();
        let note = Note {
            text: "hello".to_string(),
        };

        write_record(&store, &note)?;

        assert_eq!(read_record::<Note>(&store)?, Some(note));

        Ok(())
    }

    #[test]
    fn empty_slot_reads_as_none() -> TestResult {
        assert_eq!(read_record::<Note>(&MemoryStore::new())?, None);

        Ok(())
    }

    #[test]
    fn unknown_versions_are_rejected() -> TestResult {
        let store = MemoryStore::new();
        store.set("counter", r#"{"version":7,"data":{"value":1}}"#)?;

        let result = read_record::<Counter>(&store);

        assert!(
            matches!(
                result,
                Err(StorageError::UnsupportedVersion {
                    key: "counter",
                    found: 7
                })
            ),
            "expected unsupported version, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn legacy_values_are_migrated() -> TestResult {
        let store = MemoryStore::new();
        store.set("note", "written long ago")?;

        assert_eq!(
            read_record::<Note>(&store)?,
            Some(Note {
                text: "written long ago".to_string()
            })
        );

        Ok(())
    }

    #[test]
    fn records_without_migration_are_unrecognised() -> TestResult {
        let store = MemoryStore::new();
        store.set("counter", r#"{"value":3}"#)?;

        let result = read_record::<Counter>(&store);

        assert!(
            matches!(result, Err(StorageError::Unrecognised { key: "counter" })),
            "expected unrecognised record, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn mismatched_payload_is_malformed() -> TestResult {
        let store = MemoryStore::new();
        store.set("counter", r#"{"version":1,"data":{"value":"three"}}"#)?;

        let result = read_record::<Counter>(&store);

        assert!(
            matches!(result, Err(StorageError::Malformed { key: "counter", .. })),
            "expected malformed record, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn remove_clears_slot() -> TestResult {
        let store = MemoryStore::new();
        write_record(&store, &Counter { value: 1 })?;

        remove_record::<Counter>(&store)?;

        assert_eq!(read_record::<Counter>(&store)?, None);

        Ok(())
    }
}
