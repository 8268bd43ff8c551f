use crate::core::builder::{Category, Labels};
use crate::domain::model::{Block, RatedBlock};

/// Merges a pickrate-optimal and a winrate-optimal Block when they are
/// structurally identical (same entries, same order, same counts — labels are
/// ignored), producing one Block whose combined label carries both rates.
/// Otherwise both Blocks are kept, pick first.
pub fn merge(
    pick: RatedBlock,
    win: RatedBlock,
    combined_label: impl FnOnce(&str, &str) -> String,
) -> Vec<Block> {
    if pick.block.entries == win.block.entries {
        let label = combined_label(&pick.rate, &win.rate);
        vec![Block::new(label, pick.block.entries)]
    } else {
        vec![pick.block, win.block]
    }
}

/// Applies `merge` pairwise across two equal-length Block sequences and
/// flattens: merged pairs contribute one Block, unmerged pairs two.
pub fn merge_all(
    picks: Vec<RatedBlock>,
    wins: Vec<RatedBlock>,
    categories: &[Category],
    labels: &Labels<'_>,
) -> Vec<Block> {
    debug_assert_eq!(picks.len(), wins.len());
    debug_assert_eq!(picks.len(), categories.len());

    picks
        .into_iter()
        .zip(wins)
        .zip(categories)
        .flat_map(|((pick, win), category)| {
            merge(pick, win, |p, w| labels.combined(*category, p, w))
        })
        .collect()
}
