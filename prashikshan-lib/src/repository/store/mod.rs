//! Persistence of named collections.
//!
//! A [`Store`] has no partial-update primitive on disk: every mutation reads the whole
//! collection, changes it in memory and writes it back. It is single-owner and must not be
//! shared between concurrent writers.

use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, error, warn};

mod collection;

pub use collection::{Collection, Record};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read collection {collection}: {source}")]
    Read {
        collection: Collection,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write collection {collection}: {source}")]
    Write {
        collection: Collection,
        #[source]
        source: io::Error,
    },
    #[error("Collection {collection} is corrupt: {source}")]
    Corrupt {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode collection {collection}: {source}")]
    Encode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
    #[error("Data directory {path} is unavailable: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
enum Backend {
    /// One `<key>.json` file per collection
    Dir(PathBuf),
    /// Raw JSON text keyed by collection
    Memory(HashMap<Collection, String>),
}

#[derive(Debug)]
pub struct Store {
    backend: Backend,
}

impl Store {
    /// Open a store backed by the given directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| Error::DataDir {
            path: dir.clone(),
            source,
        })?;

        debug!("Opened store at {}", dir.display());

        Ok(Self {
            backend: Backend::Dir(dir),
        })
    }

    /// Create a store that only lives in memory. Used by tests and dry runs.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(HashMap::new()),
        }
    }

    /// Whether anything has ever been saved under this collection's key.
    pub fn contains(&self, collection: Collection) -> bool {
        match &self.backend {
            Backend::Dir(dir) => dir.join(collection.file_name()).exists(),
            Backend::Memory(map) => map.contains_key(&collection),
        }
    }

    /// Load a collection, reporting corruption. An absent collection is empty.
    pub fn load<T: Record>(&self) -> Result<Vec<T>> {
        let collection = T::COLLECTION;
        match self.read_raw(collection)? {
            Some(text) => serde_json::from_str(&text)
                .map_err(|source| Error::Corrupt { collection, source }),
            None => Ok(Vec::new()),
        }
    }

    /// Load a collection, falling back to an empty one if it can't be read.
    pub fn collection<T: Record>(&self) -> Vec<T> {
        self.load().unwrap_or_else(|err| {
            error!("{err}");
            Vec::new()
        })
    }

    /// Overwrite a whole collection.
    pub fn save<T: Record>(&mut self, records: &[T]) -> Result<()> {
        let collection = T::COLLECTION;
        let text = serde_json::to_string_pretty(records)
            .map_err(|source| Error::Encode { collection, source })?;

        self.write_raw(collection, text)
    }

    pub fn find<T: Record>(&self, id: &str) -> Option<T> {
        self.collection::<T>().into_iter().find(|r| r.id() == id)
    }

    /// Apply `f` to the record with the given id and persist the collection. Returns the updated
    /// record, or `None` without writing anything if there's no such record.
    pub fn update<T, F>(&mut self, id: &str, f: F) -> Result<Option<T>>
    where
        T: Record,
        F: FnOnce(&mut T),
    {
        let mut records = self.writable::<T>()?;
        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };

        f(record);
        let updated = record.clone();

        self.save(&records)?;

        Ok(Some(updated))
    }

    /// Add a record to the end of its collection.
    pub fn append<T: Record>(&mut self, record: T) -> Result<T> {
        let mut records = self.writable::<T>()?;
        records.push(record.clone());
        self.save(&records)?;

        Ok(record)
    }

    /// Add a record to the front of its collection.
    pub fn prepend<T: Record>(&mut self, record: T) -> Result<T> {
        let mut records = self.writable::<T>()?;
        records.insert(0, record.clone());
        self.save(&records)?;

        Ok(record)
    }

    /// Load a collection that is about to be rewritten. A corrupt collection is set aside as
    /// `<key>.json.bak` first so the write doesn't destroy it. Read failures are returned.
    fn writable<T: Record>(&self) -> Result<Vec<T>> {
        match self.load() {
            Err(err @ Error::Corrupt { .. }) => {
                error!("{err}");
                self.back_up(T::COLLECTION)?;
                Ok(Vec::new())
            }
            result => result,
        }
    }

    fn back_up(&self, collection: Collection) -> Result<()> {
        let Backend::Dir(dir) = &self.backend else {
            return Ok(());
        };

        let path = dir.join(collection.file_name());
        let backup = dir.join(collection.backup_file_name());
        fs::copy(&path, &backup).map_err(|source| Error::Write { collection, source })?;

        warn!("Kept corrupt {collection} at {}", backup.display());

        Ok(())
    }

    fn read_raw(&self, collection: Collection) -> Result<Option<String>> {
        match &self.backend {
            Backend::Dir(dir) => match fs::read_to_string(dir.join(collection.file_name())) {
                Ok(text) => Ok(Some(text)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(source) => Err(Error::Read { collection, source }),
            },
            Backend::Memory(map) => Ok(map.get(&collection).cloned()),
        }
    }

    fn write_raw(&mut self, collection: Collection, text: String) -> Result<()> {
        match &mut self.backend {
            Backend::Dir(dir) => write_atomic(dir, &dir.join(collection.file_name()), &text)
                .map_err(|source| Error::Write { collection, source }),
            Backend::Memory(map) => {
                map.insert(collection, text);
                Ok(())
            }
        }
    }

    #[cfg(test)]
    /// Store arbitrary text under a collection key, bypassing serialization.
    pub(crate) fn put_raw(&mut self, collection: Collection, text: &str) {
        self.write_raw(collection, text.to_string()).unwrap();
    }
}

/// Write through a temporary file in the same directory so a crash never leaves a half-written
/// collection behind.
fn write_atomic(dir: &Path, path: &Path, text: &str) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.persist(path).map_err(|err| err.error)?;

    Ok(())
}
