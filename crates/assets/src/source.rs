use crate::AssetError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Shared asset bytes (reference-counted).
pub type SharedAssetData = Arc<Vec<u8>>;

/// A source of embedded-image bytes.
///
/// Implementations must be cheap to call repeatedly; the waiter fetches
/// every reference of a page on every capture.
#[async_trait]
pub trait AssetSource: Send + Sync + Debug {
    /// Resolve an asset reference to its bytes.
    async fn fetch(&self, path: &str) -> Result<SharedAssetData, AssetError>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// An in-memory asset source, pre-populated before use. Works everywhere
/// and backs most tests.
#[derive(Debug, Default)]
pub struct InMemoryAssetSource {
    assets: RwLock<HashMap<String, SharedAssetData>>,
}

impl InMemoryAssetSource {
    pub fn new() -> Self {
        Self { assets: RwLock::new(HashMap::new()) }
    }

    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) {
        if let Ok(mut assets) = self.assets.write() {
            assets.insert(path.into(), Arc::new(data));
        }
    }

    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.assets.read().map(|a| a.is_empty()).unwrap_or(true)
    }
}

#[async_trait]
impl AssetSource for InMemoryAssetSource {
    async fn fetch(&self, path: &str) -> Result<SharedAssetData, AssetError> {
        let assets = self.assets.read().map_err(|_| AssetError::LoadFailed {
            path: path.to_string(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryAssetSource"
    }
}

/// Loads assets from the local filesystem relative to a base directory.
///
/// Paths are validated against traversal: absolute references and `..`
/// components are rejected before any I/O happens.
#[derive(Debug)]
pub struct FilesystemAssetSource {
    base_path: PathBuf,
}

impl FilesystemAssetSource {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self { base_path: base_path.as_ref().to_path_buf() }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }
        for component in Path::new(path).components() {
            if let std::path::Component::ParentDir = component {
                return None;
            }
        }
        Some(self.base_path.join(path))
    }
}

#[async_trait]
impl AssetSource for FilesystemAssetSource {
    async fn fetch(&self, path: &str) -> Result<SharedAssetData, AssetError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| AssetError::NotFound(format!("{} (path traversal blocked)", path)))?;

        tokio::fs::read(&full_path)
            .await
            .map(Arc::new)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AssetError::NotFound(path.to_string())
                } else {
                    AssetError::LoadFailed {
                        path: path.to_string(),
                        message: e.to_string(),
                    }
                }
            })
    }

    fn name(&self) -> &'static str {
        "FilesystemAssetSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_in_memory_add_and_fetch() {
        let source = InMemoryAssetSource::new();
        source.add("logo.png", b"png bytes".to_vec());

        let data = source.fetch("logo.png").await.unwrap();
        assert_eq!(&*data, b"png bytes");
    }

    #[tokio::test]
    async fn test_in_memory_not_found() {
        let source = InMemoryAssetSource::new();
        let result = source.fetch("missing.png").await;
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_filesystem_fetch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("icon.png"), b"icon").unwrap();

        let source = FilesystemAssetSource::new(dir.path());
        let data = source.fetch("icon.png").await.unwrap();
        assert_eq!(&*data, b"icon");
    }

    #[tokio::test]
    async fn test_filesystem_blocks_traversal() {
        let dir = tempdir().unwrap();
        let source = FilesystemAssetSource::new(dir.path());

        assert!(source.fetch("../../../etc/passwd").await.is_err());
        assert!(source.fetch("/etc/passwd").await.is_err());
    }

    #[tokio::test]
    async fn test_filesystem_allows_nested_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("logos")).unwrap();
        fs::write(dir.path().join("logos/venue.png"), b"nested").unwrap();

        let source = FilesystemAssetSource::new(dir.path());
        let data = source.fetch("logos/venue.png").await.unwrap();
        assert_eq!(&*data, b"nested");
    }
}
