//! Team gallery: list, create and delete teams.

use crate::models::{NewTeam, Player, Team, TeamId};
use crate::store::{StoreError, TeamStore};
use rand::seq::SliceRandom;
use serde::Serialize;

/// Colour classes for gallery cards.
pub const CARD_COLORS: [&str; 8] = [
    "hover:bg-red-300",
    "hover:bg-orange-300",
    "hover:bg-amber-300",
    "hover:bg-lime-300",
    "hover:bg-emerald-300",
    "hover:bg-sky-300",
    "hover:bg-violet-300",
    "hover:bg-fuchsia-300",
];

/// Random card colour; drawn again on every render.
pub fn random_card_color() -> &'static str {
    CARD_COLORS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(CARD_COLORS[0])
}

/// Team as shown on a gallery card.
#[derive(Clone, Debug, Serialize)]
pub struct TeamCard {
    pub id: TeamId,
    pub team_name: String,
    pub player_count: usize,
    pub color: &'static str,
}

impl TeamCard {
    pub fn from_team(team: &Team) -> Self {
        Self {
            id: team.id,
            team_name: team.team_name.clone(),
            player_count: team.players.len(),
            color: random_card_color(),
        }
    }
}

/// Split a comma-separated name list into players with fresh ids.
///
/// Names are trimmed; empty entries are kept as empty names. An empty input
/// string means no players at all.
pub fn parse_player_list(input: &str) -> Vec<Player> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(',').map(|name| Player::new(name.trim())).collect()
}

/// Local list of teams, mirrored from the store.
#[derive(Clone, Debug, Default)]
pub struct TeamGallery {
    teams: Vec<Team>,
}

impl TeamGallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn cards(&self) -> Vec<TeamCard> {
        self.teams.iter().map(TeamCard::from_team).collect()
    }

    /// Reload all teams (creation order). A store error empties the list.
    pub async fn refresh<S: TeamStore>(&mut self, store: &S) -> &[Team] {
        self.teams = match store.list_teams().await {
            Ok(teams) => teams,
            Err(e) => {
                log::error!("Failed to list teams: {}", e);
                Vec::new()
            }
        };
        &self.teams
    }

    /// Create a team from a name and a comma-separated player list.
    /// Returns the inserted records, which are also appended locally.
    pub async fn create_team<S: TeamStore>(
        &mut self,
        store: &S,
        team_name: &str,
        players: &str,
        owner_email: Option<&str>,
    ) -> Result<Vec<Team>, StoreError> {
        let new_team =
            NewTeam::new(team_name, parse_player_list(players)).with_email(owner_email.map(str::to_string));
        let created = store.insert_team(new_team).await.map_err(|e| {
            log::error!("Failed to create team {}: {}", team_name, e);
            e
        })?;
        self.teams.extend(created.iter().cloned());
        Ok(created)
    }

    pub async fn delete_team<S: TeamStore>(&mut self, store: &S, id: TeamId) -> Result<(), StoreError> {
        store.delete_team(id).await.map_err(|e| {
            log::error!("Failed to delete team {}: {}", id, e);
            e
        })?;
        self.teams.retain(|t| t.id != id);
        Ok(())
    }

    /// Replace the local copy of a team (after roster edits elsewhere).
    pub fn replace_local(&mut self, team: Team) {
        if let Some(existing) = self.teams.iter_mut().find(|t| t.id == team.id) {
            *existing = team;
        }
    }
}
