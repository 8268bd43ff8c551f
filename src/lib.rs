pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonApiSource, LocalStorage, MemoryStore, StaticTranslator};
pub use config::Settings;
pub use core::orchestrator::{AggregationOrchestrator, RunContext, RunOutcome};
pub use core::version::VersionResolver;
pub use domain::document::BuildDocument;
pub use utils::error::{ForgeError, Result};
