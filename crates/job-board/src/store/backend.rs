use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::fs;

use super::{CollectionKey, StoreError};

/// Raw text persistence for the named collections.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Returns `None` when the key has never been written.
    async fn read(&self, key: CollectionKey) -> Result<Option<String>, StoreError>;
    async fn write(&self, key: CollectionKey, contents: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<B: StoreBackend + ?Sized> StoreBackend for Box<B> {
    async fn read(&self, key: CollectionKey) -> Result<Option<String>, StoreError> {
        (**self).read(key).await
    }

    async fn write(&self, key: CollectionKey, contents: &str) -> Result<(), StoreError> {
        (**self).write(key, contents).await
    }
}

#[async_trait]
impl<B: StoreBackend + ?Sized> StoreBackend for Arc<B> {
    async fn read(&self, key: CollectionKey) -> Result<Option<String>, StoreError> {
        (**self).read(key).await
    }

    async fn write(&self, key: CollectionKey, contents: &str) -> Result<(), StoreError> {
        (**self).write(key, contents).await
    }
}

/// Process-local backend; contents live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<CollectionKey, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn read(&self, key: CollectionKey) -> Result<Option<String>, StoreError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn write(&self, key: CollectionKey, contents: &str) -> Result<(), StoreError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        guard.insert(key, contents.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per collection under `root`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: CollectionKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait]
impl StoreBackend for FileBackend {
    async fn read(&self, key: CollectionKey) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    async fn write(&self, key: CollectionKey, contents: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;

        // Readers never observe a half-written collection.
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, contents)
            .await
            .map_err(|source| StoreError::Io {
                path: staging.clone(),
                source,
            })?;
        fs::rename(&staging, &path)
            .await
            .map_err(|source| StoreError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_reports_unset_keys() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.read(CollectionKey::Jobs).await.expect("read"), None);
        backend
            .write(CollectionKey::Jobs, "[]")
            .await
            .expect("write succeeds");
        assert_eq!(
            backend.read(CollectionKey::Jobs).await.expect("read"),
            Some("[]".to_string())
        );
        assert_eq!(
            backend
                .read(CollectionKey::EmployerInquiries)
                .await
                .expect("read"),
            None
        );
    }

    #[tokio::test]
    async fn file_backend_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let backend = FileBackend::new(dir.path().join("data"));

        assert_eq!(
            backend
                .read(CollectionKey::EmployeeApplications)
                .await
                .expect("read"),
            None
        );
        backend
            .write(CollectionKey::EmployeeApplications, "[{\"id\":\"1\"}]")
            .await
            .expect("write succeeds");

        let path = backend.path_for(CollectionKey::EmployeeApplications);
        assert!(path.ends_with("employeeApplications.json"));
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(
            backend
                .read(CollectionKey::EmployeeApplications)
                .await
                .expect("read"),
            Some("[{\"id\":\"1\"}]".to_string())
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn file_io_yields_to_other_tasks() {
        let dir = tempfile::tempdir().expect("temp dir");
        let backend = Arc::new(FileBackend::new(dir.path()));

        let writer = {
            let backend = backend.clone();
            tokio::spawn(async move {
                for n in 0..20 {
                    backend
                        .write(CollectionKey::Jobs, &format!("[{n}]"))
                        .await
                        .expect("write succeeds");
                }
            })
        };
        let ticker = tokio::spawn(async {
            for _ in 0..20 {
                tokio::task::yield_now().await;
            }
        });

        ticker.await.expect("ticker runs beside file io");
        writer.await.expect("writer finishes");
        assert_eq!(
            backend.read(CollectionKey::Jobs).await.expect("read"),
            Some("[19]".to_string())
        );
    }
}
