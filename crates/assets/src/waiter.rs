use crate::source::{AssetSource, SharedAssetData};
use crate::AssetError;
use futures::future::join_all;
use log::{debug, warn};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::timeout;

/// Per-asset settle budget. Each embedded image gets its own clock; a slow
/// asset only ever costs this much, regardless of how the others behave.
pub const ASSET_TIMEOUT: Duration = Duration::from_millis(1000);

/// The outcome of settling one page's assets before capture.
#[derive(Debug, Default)]
pub struct SettledAssets {
    resolved: HashMap<String, SharedAssetData>,
    failures: Vec<(String, AssetError)>,
}

impl SettledAssets {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&SharedAssetData> {
        self.resolved.get(path)
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn failures(&self) -> &[(String, AssetError)] {
        &self.failures
    }
}

/// Waits until every referenced asset has loaded, errored, or hit its own
/// timeout, then returns whatever settled.
///
/// The overall wait is a join over independent per-asset waits, so the
/// worst case is one timeout budget, not one per asset.
pub async fn settle(asset_refs: &[String], source: &dyn AssetSource) -> SettledAssets {
    let waits = asset_refs.iter().map(|path| async move {
        let outcome = match timeout(ASSET_TIMEOUT, source.fetch(path)).await {
            Ok(result) => result,
            Err(_) => Err(AssetError::Timeout(path.clone(), ASSET_TIMEOUT.as_millis())),
        };
        (path.clone(), outcome)
    });

    let mut settled = SettledAssets::default();
    for (path, outcome) in join_all(waits).await {
        match outcome {
            Ok(data) => {
                debug!("asset {} settled ({} bytes)", path, data.len());
                settled.resolved.insert(path, data);
            }
            Err(error) => {
                warn!("asset {} failed to settle: {}", path, error);
                settled.failures.push((path, error));
            }
        }
    }
    settled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryAssetSource;
    use async_trait::async_trait;
    use tokio::time::Instant;

    /// A source whose fetch never completes, standing in for an image that
    /// never fires load or error.
    #[derive(Debug)]
    struct HangingSource;

    #[async_trait]
    impl AssetSource for HangingSource {
        async fn fetch(&self, _path: &str) -> Result<SharedAssetData, AssetError> {
            futures::future::pending().await
        }

        fn name(&self) -> &'static str {
            "HangingSource"
        }
    }

    #[tokio::test]
    async fn test_settle_resolves_known_assets() {
        let source = InMemoryAssetSource::new();
        source.add("a.png", vec![1]);
        source.add("b.png", vec![2]);

        let refs = vec!["a.png".to_string(), "b.png".to_string(), "c.png".to_string()];
        let settled = settle(&refs, &source).await;

        assert_eq!(settled.resolved_count(), 2);
        assert_eq!(settled.failures().len(), 1);
        assert!(matches!(settled.failures()[0].1, AssetError::NotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_bounded_by_single_timeout() {
        // Three assets that never settle must not stack their timeouts.
        let refs = vec![
            "one.png".to_string(),
            "two.png".to_string(),
            "three.png".to_string(),
        ];
        let started = Instant::now();
        let settled = settle(&refs, &HangingSource).await;
        let elapsed = started.elapsed();

        assert_eq!(settled.resolved_count(), 0);
        assert_eq!(settled.failures().len(), 3);
        for (_, error) in settled.failures() {
            assert!(matches!(error, AssetError::Timeout(_, _)));
        }
        assert!(
            elapsed < ASSET_TIMEOUT + Duration::from_millis(100),
            "settle took {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn test_settle_with_no_refs_is_immediate() {
        let source = InMemoryAssetSource::new();
        let settled = settle(&[], &source).await;
        assert_eq!(settled.resolved_count(), 0);
        assert!(settled.failures().is_empty());
    }
}
