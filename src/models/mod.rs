//! Data structures: players, teams, identity session, rotation state.

mod player;
mod rotation;
mod session;
mod team;

pub use player::{Player, PlayerId};
pub use rotation::{
    ActiveTimers, RotationEvent, RotationPhase, RotationState, TimerCommand, TimerKind,
    COUNTDOWN_PERIOD, ON_COURT, ROTATION_PERIOD, ROTATION_SECS,
};
pub use session::{AuthSession, SessionUser};
pub use team::{NewTeam, PlayersField, Team, TeamId};
