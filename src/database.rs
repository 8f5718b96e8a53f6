use serde::{de::DeserializeOwned, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use thiserror::Error;
use tokio::{fs, sync::RwLock, time};
use tracing::{debug, error, warn};

const SAVE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum DbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Codec(#[from] bincode::Error),
    #[error("Database error: {0}")]
    Custom(String),
}

#[derive(Debug)]
struct DatabaseInner<T> {
    data: T,
    path: PathBuf,
}

/// Whole-file bincode store. Every committed transaction rewrites the file.
#[derive(Clone, Debug)]
pub struct Database<T: Serialize + DeserializeOwned + Default + Send + Sync + Clone + 'static> {
    inner: Arc<RwLock<DatabaseInner<T>>>,
}

impl<T: Serialize + DeserializeOwned + Default + Send + Sync + Clone + 'static> Database<T> {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DbError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create database directory {}: {}", parent.display(), e);
                DbError::Io(e)
            })?;
        }

        let data = if fs::try_exists(&path).await? {
            Self::load(&path).await
        } else {
            debug!("Starting empty database at {}", path.display());
            T::default()
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(DatabaseInner { data, path })),
        })
    }

    // A corrupt or unreadable file starts the store over instead of keeping the bot offline.
    async fn load(path: &Path) -> T {
        match fs::read(path).await {
            Ok(bytes) => bincode::deserialize(&bytes).unwrap_or_else(|e| {
                warn!("Failed to deserialize database {}: {}", path.display(), e);
                T::default()
            }),
            Err(e) => {
                error!("Failed to read database {}: {}", path.display(), e);
                T::default()
            }
        }
    }

    async fn save(path: &Path, data: &T) -> Result<(), DbError> {
        let bytes = bincode::serialize(data)?;
        let staging = path.with_extension("tmp");

        let write = async {
            fs::write(&staging, bytes).await?;
            fs::rename(&staging, path).await
        };

        match time::timeout(SAVE_TIMEOUT, write).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                error!("Saving {} timed out", path.display());
                Err(DbError::Custom("Save operation timed out".into()))
            }
        }
    }

    /// Applies `f` to a copy of the data and commits it only if both `f` and
    /// the write to disk succeed.
    pub async fn transaction<F, R>(&self, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&mut T) -> Result<R, String>,
    {
        let mut guard = self.inner.write().await;
        let mut data = guard.data.clone();
        let result = f(&mut data).map_err(DbError::Custom)?;

        Self::save(&guard.path, &data).await?;
        guard.data = data;

        Ok(result)
    }

    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.inner.read().await;
        f(&guard.data)
    }
}
