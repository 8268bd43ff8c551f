use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::ForgeError;

/// One champion as enumerated for the current patch. Immutable per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Champion {
    pub id: i32,
    pub name: String,
}

impl Champion {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Top,
        Position::Jungle,
        Position::Mid,
        Position::Adc,
        Position::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Top => "top",
            Position::Jungle => "jungle",
            Position::Mid => "mid",
            Position::Adc => "adc",
            Position::Support => "support",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ForgeError;

    // Providers disagree on role names; the aliases below are the ones seen
    // in the wild.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Position::Top),
            "jungle" | "jungler" => Ok(Position::Jungle),
            "mid" | "middle" => Ok(Position::Mid),
            "adc" | "ad carry" | "bottom" | "bot" => Ok(Position::Adc),
            "support" | "utility" => Ok(Position::Support),
            other => Err(ForgeError::parse(format!("Unknown position: {}", other))),
        }
    }
}

/// One statistical record: an item sequence with its popularity and success
/// rates as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStat {
    pub items: Vec<u32>,
    pub pickrate: f64,
    pub winrate: f64,
}

impl ItemStat {
    pub fn new(items: Vec<u32>, pickrate: f64, winrate: f64) -> Self {
        Self {
            items,
            pickrate,
            winrate,
        }
    }
}

/// Raw per-(champion, position) statistics as returned by a source adapter.
/// Consumed, never mutated, by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPositionStats {
    pub starter: Vec<ItemStat>,
    pub core: Vec<ItemStat>,
    pub endgame: Vec<ItemStat>,
    pub boots: Vec<ItemStat>,
    pub skill_order: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    pub id: u32,
    pub count: u32,
}

/// Labeled, ordered collection of (item, count) pairs — one purchase
/// suggestion group in the output document. Entries are unique by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub label: String,
    pub entries: Vec<BlockEntry>,
}

impl Block {
    pub fn new(label: impl Into<String>, entries: Vec<BlockEntry>) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }
}

/// A Block plus the display form of the rate that selected it ("54.3" for a
/// single record, "61.2-48.9" for a band). The rate is consumed by the merger
/// for combined labels and dropped before output.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedBlock {
    pub block: Block,
    pub rate: String,
}

/// Both skill orderings are always attached regardless of which one the
/// consumer displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAnnotation {
    pub most_freq: String,
    pub highest_win: String,
}

/// Canonical per-champion/position build, assembled from Blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSet {
    pub champion: String,
    pub title: String,
    pub position_label: String,
    pub blocks: Vec<Block>,
    pub skills: SkillAnnotation,
}

/// Finest known granularity of a failed extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionScope {
    One(Position),
    All,
}

impl fmt::Display for PositionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionScope::One(p) => p.fmt(f),
            PositionScope::All => f.write_str("All"),
        }
    }
}

/// Append-only failure record for operator follow-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorJournalEntry {
    pub champion: String,
    pub position: PositionScope,
    pub source: String,
}

/// Provider version, cached once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceVersion {
    pub source_id: String,
    pub version: String,
    pub fetched_at: DateTime<Utc>,
}

/// Adapter identity. The abbreviation prefixes every title built from this
/// source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    pub abbrev: String,
}

impl SourceInfo {
    pub fn new(id: &str, name: &str, abbrev: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            abbrev: abbrev.to_string(),
        }
    }
}
