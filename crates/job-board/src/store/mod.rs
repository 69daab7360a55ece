//! Key-value persistence for the three job board collections.
//!
//! Each collection is stored as JSON text under its logical key. Every access
//! goes through the collection's async mutex, so a read-modify-write cycle
//! cannot interleave with another mutation of the same collection.

mod backend;

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::applications::EmployeeApplication;
use crate::dataset::DatasetSnapshot;
use crate::inquiries::EmployerInquiry;
use crate::jobs::Job;

pub use backend::{FileBackend, MemoryBackend, StoreBackend};

const FIXTURE_JOBS: &str = include_str!("fixtures/jobs.json");

/// Logical names of the persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Jobs,
    EmployeeApplications,
    EmployerInquiries,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 3] = [
        CollectionKey::Jobs,
        CollectionKey::EmployeeApplications,
        CollectionKey::EmployerInquiries,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Jobs => "jobs",
            CollectionKey::EmployeeApplications => "employeeApplications",
            CollectionKey::EmployerInquiries => "employerInquiries",
        }
    }

    fn initial_contents(self) -> &'static str {
        match self {
            CollectionKey::Jobs => FIXTURE_JOBS,
            CollectionKey::EmployeeApplications | CollectionKey::EmployerInquiries => "[]",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record type persisted as one collection.
pub trait Record: Serialize + DeserializeOwned + Send + 'static {
    const KEY: CollectionKey;

    fn record_id(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("stored collection '{key}' is corrupt: {source}")]
    Corrupt {
        key: CollectionKey,
        source: serde_json::Error,
    },
    #[error("stored collection '{key}' contains duplicate id '{id}'")]
    DuplicateId { key: CollectionKey, id: String },
    #[error("failed to encode collection '{key}': {source}")]
    Encode {
        key: CollectionKey,
        source: serde_json::Error,
    },
    #[error("store io failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// True when the persisted text itself is unusable.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            StoreError::Corrupt { .. } | StoreError::DuplicateId { .. }
        )
    }
}

/// Which collections `Store::seed` initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded: Vec<CollectionKey>,
}

pub struct Store<B> {
    backend: B,
    jobs: Mutex<()>,
    applications: Mutex<()>,
    inquiries: Mutex<()>,
}

impl<B: StoreBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            jobs: Mutex::new(()),
            applications: Mutex::new(()),
            inquiries: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn lock_for(&self, key: CollectionKey) -> &Mutex<()> {
        match key {
            CollectionKey::Jobs => &self.jobs,
            CollectionKey::EmployeeApplications => &self.applications,
            CollectionKey::EmployerInquiries => &self.inquiries,
        }
    }

    /// Initializes every collection that has never been written. Populated
    /// collections are left untouched.
    pub async fn seed(&self) -> Result<SeedReport, StoreError> {
        let mut report = SeedReport::default();
        for key in CollectionKey::ALL {
            let _guard = self.lock_for(key).lock().await;
            if is_unset(self.backend.read(key).await?.as_deref()) {
                self.backend.write(key, key.initial_contents()).await?;
                report.seeded.push(key);
            }
        }

        if !report.seeded.is_empty() {
            info!(seeded = ?report.seeded, "initialized empty collections");
        }
        Ok(report)
    }

    pub async fn load<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let _guard = self.lock_for(T::KEY).lock().await;
        self.decode().await
    }

    pub async fn save<T: Record>(&self, records: &[T]) -> Result<(), StoreError> {
        let _guard = self.lock_for(T::KEY).lock().await;
        self.encode(records).await
    }

    /// Loads the collection, applies `apply`, and writes the result back while
    /// holding the collection lock. Nothing is written when `apply` fails.
    pub async fn modify<T, R, E, F>(&self, apply: F) -> Result<R, E>
    where
        T: Record,
        E: From<StoreError>,
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
    {
        let _guard = self.lock_for(T::KEY).lock().await;
        let mut records = self.decode::<T>().await?;
        let outcome = apply(&mut records)?;
        self.encode(&records).await?;
        Ok(outcome)
    }

    pub async fn snapshot(&self) -> Result<DatasetSnapshot, StoreError> {
        Ok(DatasetSnapshot {
            jobs: self.load::<Job>().await?,
            employee_applications: self.load::<EmployeeApplication>().await?,
            employer_inquiries: self.load::<EmployerInquiry>().await?,
        })
    }

    async fn decode<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let raw = self.backend.read(T::KEY).await?;
        let Some(text) = raw.filter(|text| !text.trim().is_empty()) else {
            return Ok(Vec::new());
        };

        let records: Vec<T> = serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
            key: T::KEY,
            source,
        })?;

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.record_id()) {
                return Err(StoreError::DuplicateId {
                    key: T::KEY,
                    id: record.record_id().to_string(),
                });
            }
        }

        debug!(collection = T::KEY.as_str(), records = records.len(), "loaded collection");
        Ok(records)
    }

    async fn encode<T: Record>(&self, records: &[T]) -> Result<(), StoreError> {
        let text = serde_json::to_string(records).map_err(|source| StoreError::Encode {
            key: T::KEY,
            source,
        })?;
        self.backend.write(T::KEY, &text).await
    }
}

fn is_unset(raw: Option<&str>) -> bool {
    raw.map_or(true, |text| text.trim().is_empty())
}
