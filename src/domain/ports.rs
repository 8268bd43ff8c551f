use crate::domain::model::{Champion, Position, RawPositionStats, SourceInfo};
use crate::utils::error::Result;
use async_trait::async_trait;

/// One provider's network/parsing specifics. Stateless per call; every call
/// may fail with a transport or parse error.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn info(&self) -> &SourceInfo;

    async fn fetch_positions(&self, champion: &Champion) -> Result<Vec<Position>>;

    async fn fetch_stats(
        &self,
        champion: &Champion,
        position: Position,
    ) -> Result<RawPositionStats>;

    async fn fetch_version(&self) -> Result<String>;
}

/// Run-scoped accumulation store: settings in, results and the Error Journal
/// out. One instance per invocation, created at run start, read by the caller
/// at run end.
pub trait RunStore: Send + Sync {
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    fn set(&self, key: &str, value: serde_json::Value);

    /// Appends to the sequence under `key`, creating it if absent.
    fn push(&self, key: &str, value: serde_json::Value);
}

pub trait Translate: Send + Sync {
    fn translate(&self, key: &str, title_case: bool) -> String;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
