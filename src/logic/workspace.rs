//! Per-viewer workspace: gallery, current team selection, roster editor and
//! the rotation clock for that roster.
//!
//! There is exactly one clock per workspace. Changing the selection resets it
//! instead of spawning a second one, and dropping the workspace stops it.

use crate::logic::clock::RotationClock;
use crate::logic::gallery::TeamGallery;
use crate::logic::roster::{RosterEditor, RosterError};
use crate::logic::view::ViewModel;
use crate::models::{AuthSession, Player, PlayerId, RotationState, Team, TeamId};
use crate::store::{StoreError, TeamStore};
use tokio::sync::watch;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WorkspaceError {
    /// A roster action was requested with no team selected.
    NoTeamSelected,
    /// Selected team id is not in the gallery.
    TeamNotFound(TeamId),
    Store(StoreError),
    Roster(RosterError),
}

impl std::fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkspaceError::NoTeamSelected => write!(f, "No team selected"),
            WorkspaceError::TeamNotFound(id) => write!(f, "Team {} not found", id),
            WorkspaceError::Store(e) => write!(f, "{}", e),
            WorkspaceError::Roster(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WorkspaceError {}

impl From<StoreError> for WorkspaceError {
    fn from(e: StoreError) -> Self {
        WorkspaceError::Store(e)
    }
}

impl From<RosterError> for WorkspaceError {
    fn from(e: RosterError) -> Self {
        WorkspaceError::Roster(e)
    }
}

pub struct Workspace {
    session: AuthSession,
    gallery: TeamGallery,
    roster: Option<RosterEditor>,
    clock: RotationClock,
}

impl Workspace {
    /// New workspace with an idle clock. Must be called inside a tokio runtime.
    pub fn new(session: AuthSession) -> Self {
        Self {
            session,
            gallery: TeamGallery::new(),
            roster: None,
            clock: RotationClock::spawn(Vec::new()),
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Refresh the profile (e.g. new avatar) after signing in again.
    pub fn set_session(&mut self, session: AuthSession) {
        self.session = session;
    }

    pub fn gallery(&self) -> &TeamGallery {
        &self.gallery
    }

    pub fn selected(&self) -> Option<&Team> {
        self.roster.as_ref().map(RosterEditor::team)
    }

    pub fn rotation(&self) -> RotationState {
        self.clock.snapshot()
    }

    /// Receiver that sees every rotation state the clock publishes.
    pub fn subscribe_rotation(&self) -> watch::Receiver<RotationState> {
        self.clock.subscribe()
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::signed_in(&self.session, self.gallery.cards(), self.selected(), &self.rotation())
    }

    pub async fn refresh_gallery<S: TeamStore>(&mut self, store: &S) -> &[Team] {
        self.gallery.refresh(store).await
    }

    /// Create a team owned by the signed-in user.
    pub async fn create_team<S: TeamStore>(
        &mut self,
        store: &S,
        team_name: &str,
        players: &str,
    ) -> Result<Vec<Team>, WorkspaceError> {
        let owner = self.session.user.email.clone();
        Ok(self
            .gallery
            .create_team(store, team_name, players, owner.as_deref())
            .await?)
    }

    /// Delete a team. Deleting the selected team also clears the selection.
    pub async fn delete_team<S: TeamStore>(&mut self, store: &S, id: TeamId) -> Result<(), WorkspaceError> {
        self.gallery.delete_team(store, id).await?;
        if self.selected().map(|t| t.id) == Some(id) {
            self.roster = None;
            self.clock.reset().await;
            self.clock.set_roster(Vec::new()).await;
        }
        Ok(())
    }

    /// Select a team (or go back to the gallery with `None`).
    /// Rotation state always starts over.
    pub async fn select_team<S: TeamStore>(
        &mut self,
        store: &S,
        team_id: Option<TeamId>,
    ) -> Result<(), WorkspaceError> {
        let team = match team_id {
            Some(id) => {
                if self.gallery.get(id).is_none() {
                    self.gallery.refresh(store).await;
                }
                Some(self.gallery.get(id).cloned().ok_or(WorkspaceError::TeamNotFound(id))?)
            }
            None => None,
        };

        if let Some(previous) = self.roster.take() {
            self.gallery.replace_local(previous.into_team());
        }
        self.clock.reset().await;

        let players = team.as_ref().map(|t| t.players.clone()).unwrap_or_default();
        self.roster = team.map(RosterEditor::new);
        self.clock.set_roster(players).await;
        if let Some(t) = self.selected() {
            log::info!("Selected team {} ({})", t.id, t.team_name);
        }
        Ok(())
    }

    pub async fn add_player<S: TeamStore>(&mut self, store: &S, name: &str) -> Result<Player, WorkspaceError> {
        let editor = self.roster.as_mut().ok_or(WorkspaceError::NoTeamSelected)?;
        let player = editor.add_player(store, name).await?;
        self.sync_roster().await;
        Ok(player)
    }

    pub async fn remove_player<S: TeamStore>(&mut self, store: &S, id: &PlayerId) -> Result<(), WorkspaceError> {
        let editor = self.roster.as_mut().ok_or(WorkspaceError::NoTeamSelected)?;
        editor.remove_player(store, id).await?;
        self.sync_roster().await;
        Ok(())
    }

    /// Reorder; the clock follows the new local order even if persisting failed.
    pub async fn reorder<S: TeamStore>(&mut self, store: &S, from: usize, to: usize) -> Result<(), WorkspaceError> {
        let editor = self.roster.as_mut().ok_or(WorkspaceError::NoTeamSelected)?;
        let result = editor.reorder(store, from, to).await;
        if !matches!(result, Err(RosterError::IndexOutOfRange { .. })) {
            self.sync_roster().await;
        }
        Ok(result?)
    }

    pub async fn start_rotation(&self) -> Result<RotationState, WorkspaceError> {
        self.require_selection()?;
        Ok(self.clock.start().await)
    }

    pub async fn pause_rotation(&self) -> Result<RotationState, WorkspaceError> {
        self.require_selection()?;
        Ok(self.clock.pause().await)
    }

    pub async fn reset_rotation(&self) -> RotationState {
        self.clock.reset().await
    }

    fn require_selection(&self) -> Result<(), WorkspaceError> {
        self.roster.as_ref().map(|_| ()).ok_or(WorkspaceError::NoTeamSelected)
    }

    async fn sync_roster(&self) {
        let players = self.roster.as_ref().map(|r| r.players().to_vec()).unwrap_or_default();
        self.clock.set_roster(players).await;
    }
}
