//! Shared test fixtures: rosters and stores that fail on demand.
#![allow(dead_code)]

use basketball_subs_web::{MemoryStore, NewTeam, Player, StoreError, StoreResult, Team, TeamId, TeamStore};
use std::sync::atomic::{AtomicBool, Ordering};

/// Players named A, B, C, ... with the name as id.
pub fn roster(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| {
            let name = ((b'A' + i as u8) as char).to_string();
            Player::with_id(name.clone(), name)
        })
        .collect()
}

/// Store where every operation fails with the same message.
pub struct FailingStore {
    pub message: String,
}

impl FailingStore {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    fn fail<T>(&self) -> StoreResult<T> {
        Err(StoreError::Backend(self.message.clone()))
    }
}

impl TeamStore for FailingStore {
    async fn insert_team(&self, _team: NewTeam) -> StoreResult<Vec<Team>> {
        self.fail()
    }

    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        self.fail()
    }

    async fn update_players(&self, _id: TeamId, _players: &[Player]) -> StoreResult<()> {
        self.fail()
    }

    async fn delete_team(&self, _id: TeamId) -> StoreResult<()> {
        self.fail()
    }
}

/// Memory store whose writes can be switched to fail.
#[derive(Default)]
pub struct SwitchStore {
    pub inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl SwitchStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("write rejected".to_string()));
        }
        Ok(())
    }
}

impl TeamStore for SwitchStore {
    async fn insert_team(&self, team: NewTeam) -> StoreResult<Vec<Team>> {
        self.check()?;
        self.inner.insert_team(team).await
    }

    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        self.inner.list_teams().await
    }

    async fn update_players(&self, id: TeamId, players: &[Player]) -> StoreResult<()> {
        self.check()?;
        self.inner.update_players(id, players).await
    }

    async fn delete_team(&self, id: TeamId) -> StoreResult<()> {
        self.check()?;
        self.inner.delete_team(id).await
    }
}
