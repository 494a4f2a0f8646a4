pub mod error;
pub mod models;
pub mod validation;
pub mod user_info;
pub mod vote_logic;
pub mod storage;
pub mod service;

pub use error::{ErrorResponse, StorageError, StoreError};
pub use models::*;
pub use validation::*;
pub use user_info::*;
pub use vote_logic::{RankedPage, Vote, VoteError, VoteStore, HALL_OF_FAME_THRESHOLD};
pub use storage::{KeyValueStorage, MemoryStorage, VOTES_STORAGE_KEY};
pub use service::{load_votes, save_votes, try_load_votes, try_save_votes, VoteService};

#[cfg(test)]
mod tests;
