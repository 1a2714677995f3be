//! Substitution rotation state: chosen batch, counters, countdown and timers.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

/// Players on court; everyone beyond this sits in the rotating batch.
pub const ON_COURT: usize = 5;

/// Seconds per rotation interval (countdown start value and rotation period).
pub const ROTATION_SECS: u32 = 180;

/// Period of the rotation timer.
pub const ROTATION_PERIOD: Duration = Duration::from_secs(ROTATION_SECS as u64);

/// Period of the countdown timer.
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Phase of the rotation controller.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPhase {
    /// Not started, or reset. No batch chosen.
    #[default]
    Idle,
    /// Both timers armed; batches rotate every interval.
    Running,
    /// Rotation timer cancelled; countdown frozen.
    Paused,
    /// Paused a second time: countdown ticks again without the rotation timer.
    CountdownOnly,
}

/// The two periodic timers of a rotation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// 1-second tick decrementing the countdown.
    Countdown,
    /// Long-period tick advancing to the next batch.
    Rotation,
}

impl TimerKind {
    pub fn period(self) -> Duration {
        match self {
            TimerKind::Countdown => COUNTDOWN_PERIOD,
            TimerKind::Rotation => ROTATION_PERIOD,
        }
    }
}

/// Effect requested by a transition. `Arm` on an armed timer restarts it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimerCommand {
    Arm(TimerKind),
    Cancel(TimerKind),
}

/// Which timers are currently armed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActiveTimers {
    pub countdown: bool,
    pub rotation: bool,
}

impl ActiveTimers {
    pub fn any(&self) -> bool {
        self.countdown || self.rotation
    }

    pub fn set(&mut self, kind: TimerKind, armed: bool) {
        match kind {
            TimerKind::Countdown => self.countdown = armed,
            TimerKind::Rotation => self.rotation = armed,
        }
    }
}

/// Input to the rotation reducer: user controls and timer ticks.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationEvent {
    Start,
    Pause,
    Reset,
    /// Countdown timer fired.
    Tick,
    /// Rotation timer fired.
    Rotate,
    /// Roster was edited (add, remove or reorder).
    RosterChanged,
}

/// Rotation state for one viewing session of one roster. Never persisted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    /// Players currently flagged to sit out.
    pub chosen_players: BTreeSet<PlayerId>,
    /// How many times each player has been rotated out since the last reset.
    pub sub_count: HashMap<PlayerId, u32>,
    /// Seconds left in the current interval.
    pub countdown: u32,
    /// Roster index the current batch starts at.
    pub cursor: usize,
    pub phase: RotationPhase,
    pub timers: ActiveTimers,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            chosen_players: BTreeSet::new(),
            sub_count: HashMap::new(),
            countdown: ROTATION_SECS,
            cursor: 0,
            phase: RotationPhase::Idle,
            timers: ActiveTimers::default(),
        }
    }
}

impl RotationState {
    pub fn is_chosen(&self, id: &str) -> bool {
        self.chosen_players.contains(id)
    }

    /// Substitution count for a player (0 when never rotated).
    pub fn count_for(&self, id: &str) -> u32 {
        self.sub_count.get(id).copied().unwrap_or(0)
    }
}
