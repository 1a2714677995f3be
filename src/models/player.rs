//! Player on a team roster.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player. Opaque string so ids minted elsewhere
/// (e.g. `"1"` from an API client) are accepted as-is.
pub type PlayerId = String;

/// A player on a roster. Identity is the id, not the position in the list.
/// Entries sent without an id get a fresh one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default = "new_player_id")]
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a player with a fresh UUID v4 id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_player_id(),
            name: name.into(),
        }
    }

    /// Create a player with a caller-chosen id.
    pub fn with_id(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

fn new_player_id() -> PlayerId {
    Uuid::new_v4().to_string()
}
