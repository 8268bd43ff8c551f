use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::Settings;
use crate::core::assembler;
use crate::core::builder::{self, Category, Labels, CATEGORIES};
use crate::core::merger;
use crate::core::selector::{self, RateKind};
use crate::core::version::VersionResolver;
use crate::domain::model::{
    Block, Champion, ErrorJournalEntry, ItemSet, ItemStat, Position, PositionScope, RatedBlock,
    RawPositionStats, SourceInfo,
};
use crate::domain::ports::{RunStore, SourceAdapter, Translate};
use crate::utils::error::Result;

const JOURNAL_KEY: &str = "undefined_builds";
const RESULTS_KEY: &str = "item_sets";

/// How many situational records contribute to the band block.
const SITUATIONAL_COUNT: usize = 6;

/// Run-scoped handle over the accumulation store. One instance per
/// invocation; every task journals and records through it.
#[derive(Clone)]
pub struct RunContext {
    store: Arc<dyn RunStore>,
}

impl RunContext {
    pub fn new(store: Arc<dyn RunStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RunStore> {
        &self.store
    }

    /// Appends one failure record. Entries are never removed during a run.
    pub fn journal(&self, entry: ErrorJournalEntry) {
        tracing::warn!(
            "Journaling failed extraction: {} / {} ({})",
            entry.champion,
            entry.position,
            entry.source
        );
        match serde_json::to_value(&entry) {
            Ok(value) => self.store.push(JOURNAL_KEY, value),
            Err(e) => tracing::error!("Failed to serialize journal entry: {}", e),
        }
    }

    pub fn journal_entries(&self) -> Vec<ErrorJournalEntry> {
        match self.store.get(JOURNAL_KEY) {
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn record_item_sets(&self, sets: &[ItemSet]) {
        for set in sets {
            match serde_json::to_value(set) {
                Ok(value) => self.store.push(RESULTS_KEY, value),
                Err(e) => tracing::error!("Failed to serialize item set: {}", e),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    Pending,
    Fetching,
    Transforming,
    Succeeded,
    Failed,
}

fn advance(from: TaskState, to: TaskState, champion: &str, position: Position) -> TaskState {
    tracing::trace!("{} {}: {:?} -> {:?}", champion, position, from, to);
    to
}

/// The TRANSFORMING stage: raw per-position statistics into one merged build
/// or, when split builds are enabled, a most-frequent and a highest-win
/// build.
pub fn transform_position(
    champion: &Champion,
    position: Position,
    stats: &RawPositionStats,
    version: &str,
    source: &SourceInfo,
    settings: &Settings,
    translator: &dyn Translate,
) -> Result<Vec<ItemSet>> {
    let labels = Labels::new(translator);
    let remap = settings.remap_table();

    // Some champions buy no boots at all; substitute an empty record instead
    // of failing the whole position.
    let boots_stats: Vec<ItemStat> = if stats.boots.is_empty() {
        vec![ItemStat::new(Vec::new(), 0.0, 0.0)]
    } else {
        stats.boots.clone()
    };

    let build_side = |kind: RateKind| -> Result<Vec<RatedBlock>> {
        let label_for = |category: Category, rate: &str| match kind {
            RateKind::Pick => labels.pick(category, rate),
            RateKind::Win => labels.win(category, rate),
        };

        let starter = selector::select_extreme(&stats.starter, kind)?;
        let starter_rate = builder::format_rate(kind.rate_of(starter));
        let starter_block = builder::build(
            label_for(Category::Starter, &starter_rate),
            starter,
            &settings.trinkets,
            &remap,
        );

        let core = selector::select_extreme(&stats.core, kind)?;
        let core_rate = builder::format_rate(kind.rate_of(core));
        let core_block = builder::build(label_for(Category::Core, &core_rate), core, &[], &remap);

        let (top, band) = selector::select_top_k(&stats.endgame, kind, SITUATIONAL_COUNT)?;
        let band_rate = builder::format_band(band);
        let situational_ids: Vec<u32> = top.iter().flat_map(|r| r.items.iter().copied()).collect();
        let situational_block = builder::build_from_ids(
            label_for(Category::Situational, &band_rate),
            &situational_ids,
            &remap,
        );

        let boots = selector::select_extreme(&boots_stats, kind)?;
        let boots_rate = builder::format_rate(kind.rate_of(boots));
        let boots_block =
            builder::build(label_for(Category::Boots, &boots_rate), boots, &[], &remap);

        Ok(vec![
            builder::rated(starter_block, starter_rate),
            builder::rated(core_block, core_rate),
            builder::rated(situational_block, band_rate),
            builder::rated(boots_block, boots_rate),
        ])
    };

    let picks = build_side(RateKind::Pick)?;
    let wins = build_side(RateKind::Win)?;

    let skills = assembler::build_skill_annotation(
        &stats.skill_order,
        &stats.skill_order,
        settings.shorthand_skills,
    );

    if settings.split_builds {
        let most_freq_label = translator.translate("most_freq", true);
        let highest_win_label = translator.translate("highest_win", true);
        let into_blocks = |side: Vec<RatedBlock>| -> Vec<Block> {
            side.into_iter().map(|r| r.block).collect()
        };

        Ok(vec![
            assembler::assemble(
                champion,
                position,
                Some(&most_freq_label),
                skills.clone(),
                into_blocks(picks),
                version,
                source,
                translator,
            ),
            assembler::assemble(
                champion,
                position,
                Some(&highest_win_label),
                skills,
                into_blocks(wins),
                version,
                source,
                translator,
            ),
        ])
    } else {
        let blocks = merger::merge_all(picks, wins, &CATEGORIES, &labels);
        Ok(vec![assembler::assemble(
            champion, position, None, skills, blocks, version, source, translator,
        )])
    }
}

/// Completed run: every succeeded build in deterministic (source, champion,
/// position) enumeration order, plus the full Error Journal.
#[derive(Debug)]
pub struct RunOutcome {
    pub item_sets: Vec<ItemSet>,
    pub journal: Vec<ErrorJournalEntry>,
}

type Keyed = ((usize, usize, usize), Vec<ItemSet>);

/// Fans out one task per (champion, position) across all sources, isolates
/// and journals failures, and settles: every task is drained to completion
/// before results are reported, and no failure cancels a sibling.
pub struct AggregationOrchestrator {
    sources: Vec<Arc<dyn SourceAdapter>>,
    context: RunContext,
    translator: Arc<dyn Translate>,
    versions: Arc<VersionResolver>,
    settings: Arc<Settings>,
    concurrency: usize,
}

impl AggregationOrchestrator {
    pub fn new(
        sources: Vec<Arc<dyn SourceAdapter>>,
        store: Arc<dyn RunStore>,
        translator: Arc<dyn Translate>,
        settings: Settings,
        concurrency: usize,
    ) -> Self {
        Self {
            sources,
            context: RunContext::new(store),
            translator,
            versions: Arc::new(VersionResolver::default()),
            settings: Arc::new(settings),
            concurrency: concurrency.max(1),
        }
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub async fn run(&self, champions: &[Champion]) -> RunOutcome {
        // Snapshot the effective settings so downstream store readers see
        // what this run was configured with.
        if let Ok(value) = serde_json::to_value(self.settings.as_ref()) {
            self.context.store().set("settings", value);
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut champion_tasks: JoinSet<Vec<Keyed>> = JoinSet::new();

        for (source_idx, source) in self.sources.iter().enumerate() {
            for (champ_idx, champion) in champions.iter().enumerate() {
                let source = source.clone();
                let champion = champion.clone();
                let context = self.context.clone();
                let translator = self.translator.clone();
                let versions = self.versions.clone();
                let settings = self.settings.clone();
                let semaphore = semaphore.clone();

                champion_tasks.spawn(async move {
                    champion_task(
                        source, champion, source_idx, champ_idx, context, translator, versions,
                        settings, semaphore,
                    )
                    .await
                });
            }
        }

        let mut keyed: Vec<Keyed> = Vec::new();
        while let Some(joined) = champion_tasks.join_next().await {
            match joined {
                Ok(outputs) => keyed.extend(outputs),
                Err(e) => tracing::error!("Aggregation task panicked: {}", e),
            }
        }

        // Completion order is nondeterministic; the contract is enumeration
        // order.
        keyed.sort_by_key(|(key, _)| *key);
        let item_sets: Vec<ItemSet> = keyed.into_iter().flat_map(|(_, sets)| sets).collect();
        self.context.record_item_sets(&item_sets);

        let journal = self.context.journal_entries();
        tracing::info!(
            "Run complete: {} item sets assembled, {} failures journaled",
            item_sets.len(),
            journal.len()
        );

        RunOutcome { item_sets, journal }
    }
}

#[allow(clippy::too_many_arguments)]
async fn champion_task(
    source: Arc<dyn SourceAdapter>,
    champion: Champion,
    source_idx: usize,
    champ_idx: usize,
    context: RunContext,
    translator: Arc<dyn Translate>,
    versions: Arc<VersionResolver>,
    settings: Arc<Settings>,
    semaphore: Arc<Semaphore>,
) -> Vec<Keyed> {
    tracing::info!("Processing {}: {}", source.info().name, champion.name);

    let version = versions.resolve(source.as_ref()).await;

    let positions = {
        let _permit = semaphore.acquire().await.ok();
        source.fetch_positions(&champion).await
    };

    let positions = match positions {
        Ok(positions) => positions,
        Err(e) => {
            tracing::warn!("Position enumeration failed for {}: {}", champion.name, e);
            context.journal(ErrorJournalEntry {
                champion: champion.name.clone(),
                position: PositionScope::All,
                source: source.info().name.clone(),
            });
            return Vec::new();
        }
    };

    let mut position_tasks: JoinSet<Option<Keyed>> = JoinSet::new();
    for (pos_idx, position) in positions.into_iter().enumerate() {
        let source = source.clone();
        let champion = champion.clone();
        let version = version.clone();
        let context = context.clone();
        let translator = translator.clone();
        let settings = settings.clone();
        let semaphore = semaphore.clone();

        position_tasks.spawn(async move {
            position_task(
                source,
                champion,
                position,
                (source_idx, champ_idx, pos_idx),
                version,
                context,
                translator,
                settings,
                semaphore,
            )
            .await
        });
    }

    let mut outputs = Vec::new();
    while let Some(joined) = position_tasks.join_next().await {
        match joined {
            Ok(Some(output)) => outputs.push(output),
            Ok(None) => {}
            Err(e) => tracing::error!("Position task for {} panicked: {}", champion.name, e),
        }
    }
    outputs
}

#[allow(clippy::too_many_arguments)]
async fn position_task(
    source: Arc<dyn SourceAdapter>,
    champion: Champion,
    position: Position,
    key: (usize, usize, usize),
    version: String,
    context: RunContext,
    translator: Arc<dyn Translate>,
    settings: Arc<Settings>,
    semaphore: Arc<Semaphore>,
) -> Option<Keyed> {
    let mut state = TaskState::Pending;

    state = advance(state, TaskState::Fetching, &champion.name, position);
    let stats = {
        let _permit = semaphore.acquire().await.ok();
        source.fetch_stats(&champion, position).await
    };

    let stats = match stats {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!("Stats fetch failed for {} {}: {}", champion.name, position, e);
            context.journal(ErrorJournalEntry {
                champion: champion.name.clone(),
                position: PositionScope::One(position),
                source: source.info().name.clone(),
            });
            advance(state, TaskState::Failed, &champion.name, position);
            return None;
        }
    };

    state = advance(state, TaskState::Transforming, &champion.name, position);
    match transform_position(
        &champion,
        position,
        &stats,
        &version,
        source.info(),
        &settings,
        translator.as_ref(),
    ) {
        Ok(sets) => {
            advance(state, TaskState::Succeeded, &champion.name, position);
            Some((key, sets))
        }
        Err(e) => {
            tracing::warn!("Transform failed for {} {}: {}", champion.name, position, e);
            context.journal(ErrorJournalEntry {
                champion: champion.name.clone(),
                position: PositionScope::One(position),
                source: source.info().name.clone(),
            });
            advance(state, TaskState::Failed, &champion.name, position);
            None
        }
    }
}
