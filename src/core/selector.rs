use crate::domain::model::ItemStat;
use crate::utils::error::{ForgeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateKind {
    Pick,
    Win,
}

impl RateKind {
    pub fn rate_of(&self, record: &ItemStat) -> f64 {
        match self {
            RateKind::Pick => record.pickrate,
            RateKind::Win => record.winrate,
        }
    }
}

/// Returns the record with the maximum value of the given rate. Ties resolve
/// to the last maximal record in input order; downstream output depends on
/// this being stable across runs.
pub fn select_extreme<'a>(records: &'a [ItemStat], kind: RateKind) -> Result<&'a ItemStat> {
    let mut best: Option<&ItemStat> = None;
    for record in records {
        match best {
            Some(current) if kind.rate_of(record) < kind.rate_of(current) => {}
            _ => best = Some(record),
        }
    }
    best.ok_or(ForgeError::EmptyInput)
}

/// Descending stable sort by the given rate; returns the first `k` records
/// (or all of them when fewer exist) plus the inclusive [max, min] rate band
/// across the selection, for labeling.
pub fn select_top_k<'a>(
    records: &'a [ItemStat],
    kind: RateKind,
    k: usize,
) -> Result<(Vec<&'a ItemStat>, (f64, f64))> {
    if records.is_empty() {
        return Err(ForgeError::EmptyInput);
    }

    let mut sorted: Vec<&ItemStat> = records.iter().collect();
    sorted.sort_by(|a, b| {
        kind.rate_of(b)
            .partial_cmp(&kind.rate_of(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(k);

    let max = kind.rate_of(sorted[0]);
    let min = kind.rate_of(sorted[sorted.len() - 1]);
    Ok((sorted, (max, min)))
}
