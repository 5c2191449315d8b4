//! JSON file implementation of [`PlaceStore`].

use std::ffi::OsString;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use places_app::ports::PlaceStore;
use places_domain::collection::PlaceCollection;
use places_domain::error::PlacesError;
use places_domain::place::{Place, json_type_name};

use crate::error::StoreError;

const INDENT: &[u8] = b"    ";

/// Configuration for the JSON file storage adapter.
pub struct Config {
    /// Location of the backing file (e.g. `places.json`).
    pub path: PathBuf,
}

impl Config {
    /// Build a [`JsonFileStore`] from this configuration.
    ///
    /// Creates the parent directory of the backing file when it is missing.
    /// The file itself is only created by the first save.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the parent directory cannot be created.
    pub async fn build(self) -> Result<JsonFileStore, StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        Ok(JsonFileStore::new(self.path))
    }
}

/// Place store backed by a single JSON document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store reading and writing `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn read(&self) -> Result<PlaceCollection, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no backing file yet, starting empty");
                return Ok(PlaceCollection::new());
            }
            Err(source) => return Err(io_error(&self.path)(source)),
        };
        self.decode(&bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<PlaceCollection, StoreError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(StoreError::NotAnArray {
                    path: self.path.clone(),
                    found: json_type_name(&other),
                });
            }
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(Place::from(map)),
                other => Err(StoreError::NotAnObject {
                    path: self.path.clone(),
                    index,
                    found: json_type_name(&other),
                }),
            })
            .collect()
    }

    async fn write(&self, places: &PlaceCollection) -> Result<(), StoreError> {
        let bytes = encode(places)?;
        let temp_path = self.temp_path();

        if let Err(err) = self.replace_with(&temp_path, &bytes).await {
            if let Err(cleanup) = fs::remove_file(&temp_path).await
                && cleanup.kind() != ErrorKind::NotFound
            {
                tracing::warn!(path = %temp_path.display(), error = %cleanup, "failed to remove temp file");
            }
            return Err(err);
        }

        if let Err(err) = sync_parent(&self.path).await {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to sync parent directory");
        }
        Ok(())
    }

    async fn replace_with(&self, temp_path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let mut file = fs::File::create(temp_path)
            .await
            .map_err(io_error(temp_path))?;
        file.write_all(bytes).await.map_err(io_error(temp_path))?;
        file.sync_all().await.map_err(io_error(temp_path))?;
        drop(file);

        fs::rename(temp_path, &self.path)
            .await
            .map_err(io_error(&self.path))
    }
}

/// Flush the directory entry of `path` so a completed rename survives a crash.
#[cfg(unix)]
async fn sync_parent(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::File::open(parent).await?.sync_all().await
}

#[cfg(not(unix))]
#[allow(clippy::unused_async)]
async fn sync_parent(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + use<> {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

fn encode(places: &PlaceCollection) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    places.serialize(&mut serializer)?;
    Ok(buf)
}

impl PlaceStore for JsonFileStore {
    fn load(&self) -> impl Future<Output = Result<PlaceCollection, PlacesError>> + Send {
        async move { Ok(self.read().await?) }
    }

    fn save(
        &self,
        places: &PlaceCollection,
    ) -> impl Future<Output = Result<(), PlacesError>> + Send {
        async move {
            self.write(places).await?;
            tracing::debug!(path = %self.path.display(), count = places.len(), "places saved");
            Ok(())
        }
    }
}
