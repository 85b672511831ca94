//! Vote store adapters.

mod json_file;
mod memory;

pub use json_file::{JsonFileVoteStore, SnapshotFile};
pub use memory::InMemoryVoteStore;
