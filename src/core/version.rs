use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OnceCell};

use crate::domain::model::SourceVersion;
use crate::domain::ports::SourceAdapter;
use crate::utils::error::ForgeError;

pub const FALLBACK_VERSION: &str = "0.0.0";

/// Single-flight, retry-once provider version lookup.
///
/// Concurrent callers for the same source share one in-flight fetch; the
/// resolved value is cached for the rest of the run. Version resolution is
/// best-effort: a double fetch failure substitutes the fallback constant and
/// is never raised to the caller.
pub struct VersionResolver {
    fallback: String,
    cells: Mutex<HashMap<String, Arc<OnceCell<SourceVersion>>>>,
}

impl Default for VersionResolver {
    fn default() -> Self {
        Self::new(FALLBACK_VERSION)
    }
}

impl VersionResolver {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            cells: Mutex::new(HashMap::new()),
        }
    }

    pub async fn resolve(&self, adapter: &dyn SourceAdapter) -> String {
        let source_id = adapter.info().id.clone();
        let cell = {
            let mut cells = self.cells.lock().await;
            cells.entry(source_id.clone()).or_default().clone()
        };

        let resolved = cell
            .get_or_init(|| async {
                let version = self.fetch_with_retry(adapter, &source_id).await;
                SourceVersion {
                    source_id: source_id.clone(),
                    version,
                    fetched_at: Utc::now(),
                }
            })
            .await;

        resolved.version.clone()
    }

    /// Cached version metadata for a source, if already resolved this run.
    pub async fn cached(&self, source_id: &str) -> Option<SourceVersion> {
        let cells = self.cells.lock().await;
        cells.get(source_id).and_then(|c| c.get().cloned())
    }

    async fn fetch_with_retry(&self, adapter: &dyn SourceAdapter, source_id: &str) -> String {
        match adapter.fetch_version().await {
            Ok(version) => version,
            Err(first) => {
                tracing::warn!(
                    "Version fetch for {} failed, retrying once: {}",
                    source_id,
                    first
                );
                match adapter.fetch_version().await {
                    Ok(version) => version,
                    Err(_second) => {
                        let err = ForgeError::MissingVersion {
                            source_id: source_id.to_string(),
                        };
                        tracing::warn!("{}; substituting fallback '{}'", err, self.fallback);
                        self.fallback.clone()
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Champion, Position, RawPositionStats, SourceInfo};
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct SlowVersionAdapter {
        info: SourceInfo,
        calls: AtomicUsize,
        fail_times: usize,
    }

    impl SlowVersionAdapter {
        fn new(fail_times: usize) -> Self {
            Self {
                info: SourceInfo::new("slow", "Slow", "SL"),
                calls: AtomicUsize::new(0),
                fail_times,
            }
        }
    }

    #[async_trait]
    impl SourceAdapter for SlowVersionAdapter {
        fn info(&self) -> &SourceInfo {
            &self.info
        }

        async fn fetch_positions(&self, _champion: &Champion) -> Result<Vec<Position>> {
            unimplemented!("not used in version tests")
        }

        async fn fetch_stats(
            &self,
            _champion: &Champion,
            _position: Position,
        ) -> Result<RawPositionStats> {
            unimplemented!("not used in version tests")
        }

        async fn fetch_version(&self) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if call < self.fail_times {
                Err(crate::utils::error::ForgeError::parse("no version field"))
            } else {
                Ok("15.1.1".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let adapter = Arc::new(SlowVersionAdapter::new(0));
        let resolver = Arc::new(VersionResolver::default());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let adapter = adapter.clone();
            let resolver = resolver.clone();
            handles.push(tokio::spawn(async move {
                resolver.resolve(adapter.as_ref()).await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), "15.1.1");
        }
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_failure_is_retried_once() {
        let adapter = SlowVersionAdapter::new(1);
        let resolver = VersionResolver::default();

        assert_eq!(resolver.resolve(&adapter).await, "15.1.1");
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_double_failure_substitutes_fallback() {
        let adapter = SlowVersionAdapter::new(2);
        let resolver = VersionResolver::default();

        assert_eq!(resolver.resolve(&adapter).await, FALLBACK_VERSION);
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 2);

        // Fallback is cached too; no further network calls this run.
        assert_eq!(resolver.resolve(&adapter).await, FALLBACK_VERSION);
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 2);

        let cached = resolver.cached("slow").await.unwrap();
        assert_eq!(cached.version, FALLBACK_VERSION);
    }
}
