//! Roster editing: add, remove and reorder players of one team.
//!
//! Add and remove persist first and only mirror the new list locally once
//! the store accepted it. Reorder updates the local order immediately and
//! persists afterwards; a failed persist leaves the local order as moved.

use crate::models::{Player, PlayerId, Team};
use crate::store::{StoreError, TeamStore};

/// Errors from roster edits.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RosterError {
    /// Persisting the new list failed.
    Store(StoreError),
    /// Reorder index outside the roster.
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Store(e) => write!(f, "{}", e),
            RosterError::IndexOutOfRange { index, len } => {
                write!(f, "Position {} is outside the roster of {} player(s)", index, len)
            }
        }
    }
}

impl std::error::Error for RosterError {}

impl From<StoreError> for RosterError {
    fn from(e: StoreError) -> Self {
        RosterError::Store(e)
    }
}

/// Local copy of one team's roster, kept in sync with the store.
#[derive(Clone, Debug)]
pub struct RosterEditor {
    team: Team,
}

impl RosterEditor {
    pub fn new(team: Team) -> Self {
        Self { team }
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn players(&self) -> &[Player] {
        &self.team.players
    }

    pub fn into_team(self) -> Team {
        self.team
    }

    /// Append a player with a fresh id. Returns the new player.
    pub async fn add_player<S: TeamStore>(&mut self, store: &S, name: &str) -> Result<Player, RosterError> {
        let player = Player::new(name);
        let mut players = self.team.players.clone();
        players.push(player.clone());
        self.persist(store, players).await?;
        log::info!("Added player {} to team {}", player.id, self.team.id);
        Ok(player)
    }

    /// Remove a player by id. Removing an unknown id still persists the unchanged list.
    pub async fn remove_player<S: TeamStore>(&mut self, store: &S, id: &PlayerId) -> Result<(), RosterError> {
        let players: Vec<Player> = self
            .team
            .players
            .iter()
            .filter(|p| &p.id != id)
            .cloned()
            .collect();
        self.persist(store, players).await?;
        log::info!("Removed player {} from team {}", id, self.team.id);
        Ok(())
    }

    /// Move the player at `from` to `to`. The local order changes even when
    /// persisting fails; the store error is still returned.
    pub async fn reorder<S: TeamStore>(&mut self, store: &S, from: usize, to: usize) -> Result<(), RosterError> {
        let len = self.team.players.len();
        for index in [from, to] {
            if index >= len {
                return Err(RosterError::IndexOutOfRange { index, len });
            }
        }
        let moved = self.team.players.remove(from);
        self.team.players.insert(to, moved);

        if let Err(e) = store.update_players(self.team.id, &self.team.players).await {
            log::error!("Failed to persist order for team {}: {}", self.team.id, e);
            return Err(e.into());
        }
        Ok(())
    }

    async fn persist<S: TeamStore>(&mut self, store: &S, players: Vec<Player>) -> Result<(), RosterError> {
        if let Err(e) = store.update_players(self.team.id, &players).await {
            log::error!("Failed to update players of team {}: {}", self.team.id, e);
            return Err(e.into());
        }
        self.team.players = players;
        Ok(())
    }
}
