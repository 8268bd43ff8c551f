use serde::{Deserialize, Serialize};

use crate::domain::model::{Block, ItemSet};

/// Canonical output document. Field names are the binding contract that
/// surrounding tooling persists to storage; do not rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildDocument {
    #[serde(rename = "championName")]
    pub champion_name: String,

    pub title: String,

    #[serde(
        rename = "mapIdentifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub map_identifier: Option<String>,

    pub blocks: Vec<DocumentBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentBlock {
    #[serde(rename = "type")]
    pub block_type: String,

    pub items: Vec<DocumentItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentItem {
    pub id: String,
    pub count: i32,
}

impl BuildDocument {
    pub fn from_item_set(set: &ItemSet, map_identifier: Option<String>) -> Self {
        Self {
            champion_name: set.champion.clone(),
            title: set.title.clone(),
            map_identifier,
            blocks: set.blocks.iter().map(DocumentBlock::from_block).collect(),
        }
    }
}

impl DocumentBlock {
    pub fn from_block(block: &Block) -> Self {
        Self {
            block_type: block.label.clone(),
            items: block
                .entries
                .iter()
                .map(|e| DocumentItem {
                    id: e.id.to_string(),
                    count: e.count as i32,
                })
                .collect(),
        }
    }
}
