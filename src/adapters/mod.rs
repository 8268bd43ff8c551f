pub mod json_api;
pub mod storage;
pub mod store;
pub mod translate;

pub use json_api::JsonApiSource;
pub use storage::LocalStorage;
pub use store::MemoryStore;
pub use translate::StaticTranslator;
