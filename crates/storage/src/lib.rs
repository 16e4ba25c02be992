pub mod record;
pub mod repository;
pub mod sqlite;

pub use record::ProgressRecord;
pub use repository::{
    InMemoryRepository, PreferenceRepository, ProgressRepository, Storage, StorageError,
};
