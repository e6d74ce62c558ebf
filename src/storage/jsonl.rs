//! JSONL (JSON Lines) tables.
//!
//! Each table is one file; each line is one JSON row. Rows are only ever
//! appended, so a table's line order is its insertion order.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};

/// Tables kept by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Trainers,
    Pokemons,
    Items,
}

impl Table {
    /// Get the filename for this table.
    pub fn filename(&self) -> &'static str {
        match self {
            Table::Trainers => "trainers.jsonl",
            Table::Pokemons => "pokemons.jsonl",
            Table::Items => "items.jsonl",
        }
    }
}

/// A single JSONL-backed table of `T` rows.
pub struct JsonlTable<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonlTable<T> {
    /// Open a table at the given path. The file is created on first append.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Open one of the registry tables under the configured data directory.
    pub fn for_table(config: &StorageConfig, table: Table) -> Self {
        Self::new(config.table_path(table))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single row.
    pub fn append(&self, row: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(row)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended row to {:?}", self.path);
        Ok(())
    }

    /// Read every row. A missing file is an empty table; malformed lines are
    /// skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        Ok(self.read_counted()?.0)
    }

    /// Read every row along with the number of non-empty lines in the file.
    /// The line count includes malformed lines that were skipped.
    pub fn read_counted(&self) -> Result<(Vec<T>, usize), StorageError> {
        if !self.path.exists() {
            return Ok((Vec::new(), 0));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();
        let mut lines = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            lines += 1;

            match serde_json::from_str(&line) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        index + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        debug!("Read {} rows from {:?}", rows.len(), self.path);
        Ok((rows, lines))
    }

    /// Read rows matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}
