use std::collections::HashMap;

use crate::domain::model::BlockEntry;

/// Total Biscuit of Everlasting Will replaced the old rejuvenation biscuit;
/// providers still emit the legacy id. This is the only alias evidenced in
/// known fixtures.
pub const BISCUIT_LEGACY: u32 = 2010;
pub const BISCUIT_CANONICAL: u32 = 2003;

pub fn default_remap() -> HashMap<u32, u32> {
    HashMap::from([(BISCUIT_LEGACY, BISCUIT_CANONICAL)])
}

/// Deduplicates and counts a raw item-id sequence into Block entries.
///
/// Ids are remapped through `remap` first (ids absent from the table pass
/// through unchanged). Distinct canonical ids keep their first-seen order;
/// each count is the post-remap multiplicity of that id.
pub fn count(ids: &[u32], remap: &HashMap<u32, u32>) -> Vec<BlockEntry> {
    let remapped: Vec<u32> = ids
        .iter()
        .map(|id| remap.get(id).copied().unwrap_or(*id))
        .collect();

    let mut counts: HashMap<u32, u32> = HashMap::new();
    for id in &remapped {
        *counts.entry(*id).or_insert(0) += 1;
    }

    let mut seen = Vec::new();
    for id in remapped {
        if !seen.iter().any(|e: &BlockEntry| e.id == id) {
            seen.push(BlockEntry {
                id,
                count: counts[&id],
            });
        }
    }
    seen
}
