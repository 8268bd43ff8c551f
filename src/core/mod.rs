pub mod assembler;
pub mod builder;
pub mod counter;
pub mod merger;
pub mod orchestrator;
pub mod selector;
pub mod version;

pub use crate::domain::model::{
    Block, BlockEntry, Champion, ErrorJournalEntry, ItemSet, ItemStat, Position, PositionScope,
    RatedBlock, RawPositionStats, SkillAnnotation, SourceInfo, SourceVersion,
};
pub use crate::domain::ports::{RunStore, SourceAdapter, Storage, Translate};
pub use crate::utils::error::Result;
