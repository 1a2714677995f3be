//! Basketball substitutions web app: library with models, business logic,
//! record store and HTTP routes.

pub mod config;
pub mod http;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    parse_player_list, RosterEditor, RosterError, RotationClock, TeamGallery, ViewModel, Workspace,
    WorkspaceError,
};
pub use models::{
    AuthSession, NewTeam, Player, PlayerId, RotationEvent, RotationPhase, RotationState, SessionUser,
    Team, TeamId, TimerCommand, TimerKind, ON_COURT, ROTATION_SECS,
};
pub use store::{MemoryStore, StoreError, StoreResult, TeamStore};
