use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::model::{Champion, ItemStat, Position, RawPositionStats, SourceInfo};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::{ForgeError, Result};

/// Provider adapter for a JSON statistics API.
///
/// Endpoints, relative to the base URL:
///   GET /versions.json
///   GET /champions/{name}/positions.json
///   GET /champions/{name}/{position}.json
///
/// Transport and timeout failures surface as `Transport`; an unexpected
/// response shape surfaces as `Parse`. Calls are stateless.
pub struct JsonApiSource {
    info: SourceInfo,
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct VersionsPayload {
    versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PositionsPayload {
    positions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StatsPayload {
    starter: Vec<WireStat>,
    core: Vec<WireStat>,
    endgame: Vec<WireStat>,
    #[serde(default)]
    boots: Vec<WireStat>,
    #[serde(rename = "skillOrder", default)]
    skill_order: String,
}

#[derive(Debug, Deserialize)]
struct WireStat {
    items: Vec<u32>,
    pickrate: f64,
    winrate: f64,
}

impl From<WireStat> for ItemStat {
    fn from(wire: WireStat) -> Self {
        ItemStat::new(wire.items, wire.pickrate, wire.winrate)
    }
}

impl JsonApiSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            info: SourceInfo::new("statsjson", "StatsJson", "SJ"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ForgeError::parse(format!("Unexpected response from {}: {}", url, e)))
    }
}

#[async_trait]
impl SourceAdapter for JsonApiSource {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    async fn fetch_positions(&self, champion: &Champion) -> Result<Vec<Position>> {
        let path = format!("champions/{}/positions.json", champion.name.to_lowercase());
        let payload: PositionsPayload = self.get_json(&path).await?;

        payload
            .positions
            .iter()
            .map(|p| p.parse::<Position>())
            .collect()
    }

    async fn fetch_stats(
        &self,
        champion: &Champion,
        position: Position,
    ) -> Result<RawPositionStats> {
        let path = format!(
            "champions/{}/{}.json",
            champion.name.to_lowercase(),
            position
        );
        let payload: StatsPayload = self.get_json(&path).await?;

        Ok(RawPositionStats {
            starter: payload.starter.into_iter().map(ItemStat::from).collect(),
            core: payload.core.into_iter().map(ItemStat::from).collect(),
            endgame: payload.endgame.into_iter().map(ItemStat::from).collect(),
            boots: payload.boots.into_iter().map(ItemStat::from).collect(),
            skill_order: payload.skill_order,
        })
    }

    async fn fetch_version(&self) -> Result<String> {
        let payload: VersionsPayload = self.get_json("versions.json").await?;
        payload
            .versions
            .into_iter()
            .next()
            .ok_or_else(|| ForgeError::parse("Empty versions list"))
    }
}
