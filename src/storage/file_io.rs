//! Collection documents on disk
//!
//! Each collection (`incomes`, `expenses`) lives in one JSON document. Writes
//! go to a sibling temp file that is synced and renamed over the original, so
//! a failed write never leaves a half-written collection behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::BudgetError;

/// Current on-disk layout version of a collection document
pub const COLLECTION_SCHEMA_VERSION: u32 = 1;

/// The JSON document holding one collection, in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionFile<T> {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

/// Borrowed form of [`CollectionFile`] used when writing
#[derive(Serialize)]
struct CollectionRef<'a, T> {
    schema_version: u32,
    records: &'a [T],
}

fn default_schema_version() -> u32 {
    COLLECTION_SCHEMA_VERSION
}

impl<T> Default for CollectionFile<T> {
    fn default() -> Self {
        Self {
            schema_version: COLLECTION_SCHEMA_VERSION,
            records: Vec::new(),
        }
    }
}

/// Read a collection, treating a missing file as an empty collection
pub fn read_collection<T, P>(path: P) -> Result<Vec<T>, BudgetError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| BudgetError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let document: CollectionFile<T> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| BudgetError::Storage(format!("Failed to parse {}: {}", path.display(), e)))?;

    if document.schema_version > COLLECTION_SCHEMA_VERSION {
        return Err(BudgetError::Storage(format!(
            "{} was written by a newer version (schema {})",
            path.display(),
            document.schema_version
        )));
    }

    Ok(document.records)
}

/// Replace a collection on disk atomically (write temp, sync, rename)
pub fn write_collection_atomic<T, P>(path: P, records: &[T]) -> Result<(), BudgetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let document = CollectionRef {
        schema_version: COLLECTION_SCHEMA_VERSION,
        records,
    };

    let file = File::create(&temp_path)
        .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document)
        .map_err(|e| BudgetError::Storage(format!("Failed to serialize collection: {}", e)))?;

    writer
        .flush()
        .map_err(|e| BudgetError::Storage(format!("Failed to flush collection: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| BudgetError::Storage(format!("Failed to sync collection: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BudgetError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })
}
