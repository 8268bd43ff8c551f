use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use setforge::core::{
    Champion, ErrorJournalEntry, ItemStat, Position, PositionScope, RawPositionStats, SourceInfo,
};
use setforge::domain::ports::SourceAdapter;
use setforge::utils::error::{ForgeError, Result};
use setforge::{AggregationOrchestrator, MemoryStore, Settings, StaticTranslator};

fn sample_stats() -> RawPositionStats {
    RawPositionStats {
        starter: vec![ItemStat::new(vec![1056, 2003], 40.0, 48.0)],
        core: vec![ItemStat::new(vec![3089], 60.0, 52.0)],
        endgame: vec![
            ItemStat::new(vec![3157], 30.0, 55.0),
            ItemStat::new(vec![3135], 25.0, 54.0),
        ],
        boots: vec![ItemStat::new(vec![3020], 80.0, 50.0)],
        skill_order: "QWEQ".to_string(),
    }
}

/// Scripted provider double: configurable position lists, one optionally
/// poisoned (champion, position) pair, and optional per-champion position
/// enumeration failure. Delays vary per champion so completion order differs
/// from enumeration order.
struct ScriptedSource {
    info: SourceInfo,
    positions: Vec<Position>,
    poisoned_stats: Option<(String, Position)>,
    poisoned_positions: Option<String>,
    empty_group_for: Option<(String, Position)>,
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            info: SourceInfo::new("scripted", "Scripted", "SC"),
            positions: vec![Position::Mid, Position::Support],
            poisoned_stats: None,
            poisoned_positions: None,
            empty_group_for: None,
        }
    }
}

#[async_trait]
impl SourceAdapter for ScriptedSource {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    async fn fetch_positions(&self, champion: &Champion) -> Result<Vec<Position>> {
        // Later champions answer faster, so completion order inverts
        // enumeration order.
        let delay = 40u64.saturating_sub(champion.id as u64 * 10);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if self.poisoned_positions.as_deref() == Some(champion.name.as_str()) {
            return Err(ForgeError::parse("no position banner"));
        }
        Ok(self.positions.clone())
    }

    async fn fetch_stats(
        &self,
        champion: &Champion,
        position: Position,
    ) -> Result<RawPositionStats> {
        tokio::time::sleep(Duration::from_millis(5)).await;

        if let Some((champ, pos)) = &self.poisoned_stats {
            if champ == &champion.name && *pos == position {
                return Err(ForgeError::parse("missing stats table"));
            }
        }
        if let Some((champ, pos)) = &self.empty_group_for {
            if champ == &champion.name && *pos == position {
                let mut stats = sample_stats();
                stats.starter.clear();
                return Ok(stats);
            }
        }
        Ok(sample_stats())
    }

    async fn fetch_version(&self) -> Result<String> {
        Ok("15.1".to_string())
    }
}

fn champions(names: &[&str]) -> Vec<Champion> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| Champion::new(idx as i32, *name))
        .collect()
}

fn orchestrator(source: ScriptedSource) -> AggregationOrchestrator {
    AggregationOrchestrator::new(
        vec![Arc::new(source)],
        Arc::new(MemoryStore::new()),
        Arc::new(StaticTranslator::new()),
        Settings::default(),
        4,
    )
}

#[tokio::test]
async fn test_poisoned_pair_loses_exactly_one_item_set() {
    let mut source = ScriptedSource::new();
    source.poisoned_stats = Some(("Annie".to_string(), Position::Support));

    let outcome = orchestrator(source)
        .run(&champions(&["Ahri", "Annie", "Akali"]))
        .await;

    // 3 champions x 2 positions, one pair poisoned.
    assert_eq!(outcome.item_sets.len(), 5);
    assert_eq!(
        outcome.journal,
        vec![ErrorJournalEntry {
            champion: "Annie".to_string(),
            position: PositionScope::One(Position::Support),
            source: "Scripted".to_string(),
        }]
    );

    // No surviving pair lost or duplicated.
    let titles: Vec<(String, String)> = outcome
        .item_sets
        .iter()
        .map(|s| (s.champion.clone(), s.position_label.clone()))
        .collect();
    let mut deduped = titles.clone();
    deduped.dedup();
    assert_eq!(titles, deduped);
    assert!(!titles.contains(&("Annie".to_string(), "Support".to_string())));
}

#[tokio::test]
async fn test_position_enumeration_failure_journals_all_scope() {
    let mut source = ScriptedSource::new();
    source.poisoned_positions = Some("Annie".to_string());

    let outcome = orchestrator(source)
        .run(&champions(&["Ahri", "Annie"]))
        .await;

    assert_eq!(outcome.item_sets.len(), 2);
    assert_eq!(
        outcome.journal,
        vec![ErrorJournalEntry {
            champion: "Annie".to_string(),
            position: PositionScope::All,
            source: "Scripted".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_empty_stat_group_is_journaled_like_transport_failure() {
    let mut source = ScriptedSource::new();
    source.empty_group_for = Some(("Ahri".to_string(), Position::Mid));

    let outcome = orchestrator(source).run(&champions(&["Ahri"])).await;

    assert_eq!(outcome.item_sets.len(), 1); // support survives
    assert_eq!(
        outcome.journal,
        vec![ErrorJournalEntry {
            champion: "Ahri".to_string(),
            position: PositionScope::One(Position::Mid),
            source: "Scripted".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_result_order_is_enumeration_order_not_completion_order() {
    let names = ["Ahri", "Annie", "Akali", "Ashe"];
    let outcome = orchestrator(ScriptedSource::new())
        .run(&champions(&names))
        .await;

    assert_eq!(outcome.item_sets.len(), names.len() * 2);

    let got: Vec<(String, String)> = outcome
        .item_sets
        .iter()
        .map(|s| (s.champion.clone(), s.position_label.clone()))
        .collect();

    let mut expected = Vec::new();
    for name in names {
        for label in ["Mid", "Support"] {
            expected.push((name.to_string(), label.to_string()));
        }
    }
    assert_eq!(got, expected);
}

#[tokio::test]
async fn test_journal_accumulates_in_run_store() {
    let mut source = ScriptedSource::new();
    source.poisoned_positions = Some("Ahri".to_string());

    let store = Arc::new(MemoryStore::new());
    let orchestrator = AggregationOrchestrator::new(
        vec![Arc::new(source)],
        store.clone(),
        Arc::new(StaticTranslator::new()),
        Settings::default(),
        2,
    );

    let outcome = orchestrator.run(&champions(&["Ahri"])).await;
    assert!(outcome.item_sets.is_empty());

    // The journal and the result collection both live in the run store.
    use setforge::domain::ports::RunStore;
    let journal = store.get("undefined_builds").unwrap();
    assert_eq!(journal.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_multiple_sources_tag_journal_entries() {
    let mut flaky = ScriptedSource::new();
    flaky.info = SourceInfo::new("flaky", "Flaky", "FL");
    flaky.poisoned_stats = Some(("Ahri".to_string(), Position::Mid));

    let healthy = ScriptedSource::new();

    let orchestrator = AggregationOrchestrator::new(
        vec![Arc::new(healthy), Arc::new(flaky)],
        Arc::new(MemoryStore::new()),
        Arc::new(StaticTranslator::new()),
        Settings::default(),
        4,
    );

    let outcome = orchestrator.run(&champions(&["Ahri"])).await;

    // 2 sources x 2 positions, minus the one poisoned pair.
    assert_eq!(outcome.item_sets.len(), 3);
    assert_eq!(outcome.journal.len(), 1);
    assert_eq!(outcome.journal[0].source, "Flaky");

    // Healthy source results come first (source enumeration order).
    assert!(outcome.item_sets[0].title.starts_with("SC "));
    assert!(outcome.item_sets[2].title.starts_with("FL "));
}

#[tokio::test]
async fn test_version_fallback_never_aborts_run() {
    struct NoVersionSource(ScriptedSource);

    #[async_trait]
    impl SourceAdapter for NoVersionSource {
        fn info(&self) -> &SourceInfo {
            self.0.info()
        }
        async fn fetch_positions(&self, champion: &Champion) -> Result<Vec<Position>> {
            self.0.fetch_positions(champion).await
        }
        async fn fetch_stats(
            &self,
            champion: &Champion,
            position: Position,
        ) -> Result<RawPositionStats> {
            self.0.fetch_stats(champion, position).await
        }
        async fn fetch_version(&self) -> Result<String> {
            Err(ForgeError::parse("no version endpoint"))
        }
    }

    let orchestrator = AggregationOrchestrator::new(
        vec![Arc::new(NoVersionSource(ScriptedSource::new()))],
        Arc::new(MemoryStore::new()),
        Arc::new(StaticTranslator::new()),
        Settings::default(),
        2,
    );

    let outcome = orchestrator.run(&champions(&["Ahri"])).await;

    assert_eq!(outcome.item_sets.len(), 2);
    assert!(outcome.journal.is_empty());
    // Fallback version lands in the titles.
    assert!(outcome.item_sets[0].title.ends_with("0.0.0"));
}
