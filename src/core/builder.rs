use std::collections::HashMap;

use crate::core::counter;
use crate::domain::model::{Block, ItemStat, RatedBlock};
use crate::domain::ports::Translate;

/// The four purchase-suggestion groups a build is composed of, in the order
/// they appear in the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Starter,
    Core,
    Situational,
    Boots,
}

pub const CATEGORIES: [Category; 4] = [
    Category::Starter,
    Category::Core,
    Category::Situational,
    Category::Boots,
];

impl Category {
    fn pick_key(&self) -> &'static str {
        match self {
            Category::Starter => "mf_starters",
            Category::Core => "mf_core",
            Category::Situational => "mf_items",
            Category::Boots => "mf_boots",
        }
    }

    fn win_key(&self) -> &'static str {
        match self {
            Category::Starter => "hw_starters",
            Category::Core => "hw_core",
            Category::Situational => "hw_items",
            Category::Boots => "hw_boots",
        }
    }

    fn combined_key(&self) -> &'static str {
        match self {
            Category::Starter => "highest_start",
            Category::Core => "highest_core",
            Category::Situational => "highest_items",
            Category::Boots => "highest_boots",
        }
    }
}

/// Label texts for every (category, rate kind) combination, resolved through
/// the localization collaborator. Rates arrive pre-formatted so a single
/// value ("54.3") and a band ("61.2-48.9") render through the same templates.
pub struct Labels<'t> {
    translator: &'t dyn Translate,
}

impl<'t> Labels<'t> {
    pub fn new(translator: &'t dyn Translate) -> Self {
        Self { translator }
    }

    pub fn pick(&self, category: Category, rate: &str) -> String {
        format!(
            "{} - Pickrate: {}%",
            self.translator.translate(category.pick_key(), true),
            rate
        )
    }

    pub fn win(&self, category: Category, rate: &str) -> String {
        format!(
            "{} - Winrate: {}%",
            self.translator.translate(category.win_key(), true),
            rate
        )
    }

    pub fn combined(&self, category: Category, pick_rate: &str, win_rate: &str) -> String {
        format!(
            "{}/{} - Winrate: {}%, Pickrate: {}%",
            self.translator.translate("frequent", true),
            self.translator.translate(category.combined_key(), true),
            win_rate,
            pick_rate
        )
    }
}

/// Rates are rendered the way the provider reported them, without forcing a
/// fixed precision.
pub fn format_rate(rate: f64) -> String {
    format!("{}", rate)
}

pub fn format_band(band: (f64, f64)) -> String {
    format!("{}-{}", band.0, band.1)
}

/// Composes a labeled Block from a selected record plus always-included
/// supplementary items (e.g. trinkets), delegating dedup and counting.
pub fn build(
    label: impl Into<String>,
    record: &ItemStat,
    extra_items: &[u32],
    remap: &HashMap<u32, u32>,
) -> Block {
    let mut ids = record.items.clone();
    ids.extend_from_slice(extra_items);
    Block::new(label, counter::count(&ids, remap))
}

/// Same, from a flattened id sequence (used for the situational band where
/// several records contribute).
pub fn build_from_ids(label: impl Into<String>, ids: &[u32], remap: &HashMap<u32, u32>) -> Block {
    Block::new(label, counter::count(ids, remap))
}

pub fn rated(block: Block, rate: String) -> RatedBlock {
    RatedBlock { block, rate }
}
