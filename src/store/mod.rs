//! Record store for the `teams` table.
//!
//! The hosted store is reached over the network, so every operation is async.
//! An `Err` is the store's `{ error }` response and must short-circuit any
//! local state update by the caller.

mod memory;

pub use memory::MemoryStore;

use crate::models::{NewTeam, Player, Team, TeamId};
use std::future::Future;

/// Error reported by the record store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// No row with this id.
    NotFound(TeamId),
    /// The store rejected or failed the request; message is passed through.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Team {} not found", id),
            StoreError::Backend(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD operations on team records.
pub trait TeamStore {
    /// Insert a team and return the inserted rows.
    fn insert_team(&self, team: NewTeam) -> impl Future<Output = StoreResult<Vec<Team>>>;

    /// All teams ordered by `created_at` ascending.
    fn list_teams(&self) -> impl Future<Output = StoreResult<Vec<Team>>>;

    /// Replace a team's player list.
    fn update_players(&self, id: TeamId, players: &[Player]) -> impl Future<Output = StoreResult<()>>;

    fn delete_team(&self, id: TeamId) -> impl Future<Output = StoreResult<()>>;
}
