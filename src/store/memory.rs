//! In-process stand-in for the hosted `teams` table.

use super::{StoreError, StoreResult, TeamStore};
use crate::models::{NewTeam, Player, Team, TeamId};
use chrono::Utc;
use std::sync::Mutex;

#[derive(Default)]
struct Tables {
    next_id: TeamId,
    teams: Vec<Team>,
}

/// Team rows kept in memory. Ids are assigned sequentially from 1 and rows
/// are kept in insertion order, which is also `created_at` order.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> StoreResult<T>) -> StoreResult<T> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        f(&mut tables)
    }
}

impl TeamStore for MemoryStore {
    async fn insert_team(&self, team: NewTeam) -> StoreResult<Vec<Team>> {
        self.with_tables(|t| {
            t.next_id += 1;
            let row = Team {
                id: t.next_id,
                team_name: team.team_name,
                players: team.players,
                logo: None,
                email: team.email,
                created_at: Utc::now(),
            };
            t.teams.push(row.clone());
            Ok(vec![row])
        })
    }

    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        self.with_tables(|t| {
            let mut teams = t.teams.clone();
            teams.sort_by_key(|team| (team.created_at, team.id));
            Ok(teams)
        })
    }

    async fn update_players(&self, id: TeamId, players: &[Player]) -> StoreResult<()> {
        self.with_tables(|t| {
            let team = t
                .teams
                .iter_mut()
                .find(|team| team.id == id)
                .ok_or(StoreError::NotFound(id))?;
            team.players = players.to_vec();
            Ok(())
        })
    }

    async fn delete_team(&self, id: TeamId) -> StoreResult<()> {
        self.with_tables(|t| {
            let idx = t
                .teams
                .iter()
                .position(|team| team.id == id)
                .ok_or(StoreError::NotFound(id))?;
            t.teams.remove(idx);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_ids_and_lists_in_creation_order() {
        let store = MemoryStore::new();
        let hawks = store.insert_team(NewTeam::new("Hawks", vec![])).await.unwrap();
        let owls = store
            .insert_team(NewTeam::new("Owls", vec![Player::new("Ann")]))
            .await
            .unwrap();
        assert_eq!(hawks[0].id, 1);
        assert_eq!(owls[0].id, 2);

        let names: Vec<_> = store
            .list_teams()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.team_name)
            .collect();
        assert_eq!(names, vec!["Hawks", "Owls"]);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_fail() {
        let store = MemoryStore::new();
        assert_eq!(store.update_players(9, &[]).await, Err(StoreError::NotFound(9)));
        assert_eq!(store.delete_team(9).await, Err(StoreError::NotFound(9)));
    }
}
