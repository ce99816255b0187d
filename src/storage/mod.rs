mod file_storage;
pub mod flusher;
pub mod migration;
mod models;

pub use file_storage::{write_atomic, FileStorage, StorageError};
pub use flusher::FlushHandle;
pub use models::*;
