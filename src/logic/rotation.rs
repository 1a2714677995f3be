//! Substitution rotation: one reducer for controls and both timer ticks.

use crate::models::{
    Player, PlayerId, RotationEvent, RotationPhase, RotationState, TimerCommand, TimerKind, ON_COURT,
    ROTATION_SECS,
};
use std::collections::BTreeSet;

/// Apply one event to the rotation state and return the timer changes it needs.
///
/// Every state change (user controls, roster edits and both timer ticks)
/// goes through here, so the countdown and the batch can never disagree.
/// Events that are not valid in the current phase are ignored.
pub fn apply(state: &mut RotationState, roster: &[Player], event: RotationEvent) -> Vec<TimerCommand> {
    use RotationPhase::*;
    match (event, state.phase) {
        (RotationEvent::Start, Running) => Vec::new(),
        (RotationEvent::Start, _) => begin(state, roster),
        (RotationEvent::Pause, Running) => {
            state.phase = Paused;
            disarm(state, TimerKind::Rotation)
        }
        // Second press while paused restarts the countdown-only ticker.
        (RotationEvent::Pause, Paused | CountdownOnly) => {
            state.phase = CountdownOnly;
            arm(state, TimerKind::Countdown)
        }
        (RotationEvent::Pause, Idle) => Vec::new(),
        (RotationEvent::Reset, _) => reset(state),
        (RotationEvent::Tick, Running | CountdownOnly) => tick(state, roster),
        (RotationEvent::Tick, _) => Vec::new(),
        (RotationEvent::Rotate, Running) => rotate(state, roster),
        (RotationEvent::Rotate, _) => Vec::new(),
        (RotationEvent::RosterChanged, _) => roster_changed(state, roster),
    }
}

/// Number of players sitting out for a roster of `len`.
pub fn batch_size(len: usize) -> usize {
    len.saturating_sub(ON_COURT)
}

/// Ids of the `batch` players starting at `cursor`, wrapping around the roster.
pub fn select_batch(roster: &[Player], cursor: usize, batch: usize) -> Vec<&str> {
    if roster.is_empty() {
        return Vec::new();
    }
    (0..batch.min(roster.len()))
        .map(|i| roster[(cursor + i) % roster.len()].id.as_str())
        .collect()
}

/// Drop chosen players that are no longer on the roster.
pub fn retain_roster(state: &mut RotationState, roster: &[Player]) {
    state
        .chosen_players
        .retain(|id| roster.iter().any(|p| &p.id == id));
}

/// Roster edited under a rotation.
///
/// 1. Drop chosen players that left and keep the cursor inside the roster.
/// 2. Roster of 5 or fewer: nobody sits out, go idle and cancel both timers.
/// 3. Batch size changed while active: choose again from the cursor. Only
///    newly chosen players are counted; the countdown keeps running.
fn roster_changed(state: &mut RotationState, roster: &[Player]) -> Vec<TimerCommand> {
    retain_roster(state, roster);
    state.cursor = if roster.is_empty() { 0 } else { state.cursor % roster.len() };
    if state.phase == RotationPhase::Idle {
        return Vec::new();
    }

    let batch = batch_size(roster.len());
    if batch == 0 {
        log::debug!("Roster down to {} player(s), rotation stopped", roster.len());
        state.chosen_players.clear();
        state.countdown = ROTATION_SECS;
        state.phase = RotationPhase::Idle;
        return disarm_all(state);
    }

    if state.chosen_players.len() != batch {
        let chosen: BTreeSet<PlayerId> = select_batch(roster, state.cursor, batch)
            .into_iter()
            .map(str::to_string)
            .collect();
        for id in chosen.difference(&state.chosen_players) {
            *state.sub_count.entry(id.clone()).or_insert(0) += 1;
        }
        state.chosen_players = chosen;
    }
    Vec::new()
}

/// Start a rotation from the current cursor.
///
/// 1. Cancel whatever is armed and clear the chosen set.
/// 2. Roster of 5 or fewer: nobody sits out, stay idle with no timers.
/// 3. Otherwise choose `len - 5` players from the cursor, bump their counters,
///    restart the countdown and arm both timers.
fn begin(state: &mut RotationState, roster: &[Player]) -> Vec<TimerCommand> {
    let mut commands = disarm_all(state);
    state.chosen_players.clear();

    let batch = batch_size(roster.len());
    if batch == 0 {
        state.phase = RotationPhase::Idle;
        return commands;
    }

    choose(state, roster, batch);
    state.phase = RotationPhase::Running;
    commands.extend(arm(state, TimerKind::Rotation));
    commands.extend(arm(state, TimerKind::Countdown));
    commands
}

/// Rotation timer fired: advance the cursor by one batch and choose again.
fn rotate(state: &mut RotationState, roster: &[Player]) -> Vec<TimerCommand> {
    let batch = batch_size(roster.len());
    if batch == 0 {
        // Roster shrank under a running rotation.
        return begin(state, roster);
    }
    state.cursor = (state.cursor + batch) % roster.len();
    choose(state, roster, batch);
    Vec::new()
}

/// Countdown timer fired. Reaching zero starts over from the cursor.
fn tick(state: &mut RotationState, roster: &[Player]) -> Vec<TimerCommand> {
    if state.chosen_players.is_empty() {
        return Vec::new();
    }
    state.countdown = state.countdown.saturating_sub(1);
    if state.countdown > 0 {
        return Vec::new();
    }
    log::debug!("Countdown expired at cursor {}, restarting rotation", state.cursor);
    state.countdown = ROTATION_SECS;
    begin(state, roster)
}

fn reset(state: &mut RotationState) -> Vec<TimerCommand> {
    let commands = disarm_all(state);
    state.sub_count.clear();
    state.chosen_players.clear();
    state.cursor = 0;
    state.countdown = ROTATION_SECS;
    state.phase = RotationPhase::Idle;
    commands
}

fn choose(state: &mut RotationState, roster: &[Player], batch: usize) {
    let chosen: Vec<String> = select_batch(roster, state.cursor, batch)
        .into_iter()
        .map(str::to_string)
        .collect();
    for id in &chosen {
        *state.sub_count.entry(id.clone()).or_insert(0) += 1;
    }
    state.chosen_players = chosen.into_iter().collect();
    state.countdown = ROTATION_SECS;
}

fn arm(state: &mut RotationState, kind: TimerKind) -> Vec<TimerCommand> {
    state.timers.set(kind, true);
    vec![TimerCommand::Arm(kind)]
}

fn disarm(state: &mut RotationState, kind: TimerKind) -> Vec<TimerCommand> {
    state.timers.set(kind, false);
    vec![TimerCommand::Cancel(kind)]
}

fn disarm_all(state: &mut RotationState) -> Vec<TimerCommand> {
    let mut commands = Vec::new();
    if state.timers.rotation {
        commands.extend(disarm(state, TimerKind::Rotation));
    }
    if state.timers.countdown {
        commands.extend(disarm(state, TimerKind::Countdown));
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActiveTimers;

    fn roster(names: &[&str]) -> Vec<Player> {
        names.iter().map(|n| Player::with_id(*n, *n)).collect()
    }

    #[test]
    fn select_batch_wraps_around_roster() {
        let r = roster(&["A", "B", "C", "D", "E", "F", "G"]);
        assert_eq!(select_batch(&r, 6, 2), vec!["G", "A"]);
        assert_eq!(select_batch(&r, 0, 2), vec!["A", "B"]);
        assert!(select_batch(&[], 3, 2).is_empty());
    }

    #[test]
    fn batch_size_is_zero_up_to_five() {
        assert_eq!(batch_size(0), 0);
        assert_eq!(batch_size(5), 0);
        assert_eq!(batch_size(8), 3);
    }

    #[test]
    fn pause_toggles_into_countdown_only() {
        let r = roster(&["A", "B", "C", "D", "E", "F"]);
        let mut s = RotationState::default();
        apply(&mut s, &r, RotationEvent::Start);

        let cmds = apply(&mut s, &r, RotationEvent::Pause);
        assert_eq!(cmds, vec![TimerCommand::Cancel(TimerKind::Rotation)]);
        assert_eq!(s.phase, RotationPhase::Paused);
        assert_eq!(s.timers, ActiveTimers { countdown: true, rotation: false });

        // Frozen while paused.
        apply(&mut s, &r, RotationEvent::Tick);
        assert_eq!(s.countdown, ROTATION_SECS);

        let cmds = apply(&mut s, &r, RotationEvent::Pause);
        assert_eq!(cmds, vec![TimerCommand::Arm(TimerKind::Countdown)]);
        assert_eq!(s.phase, RotationPhase::CountdownOnly);
        apply(&mut s, &r, RotationEvent::Tick);
        assert_eq!(s.countdown, ROTATION_SECS - 1);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let r = roster(&["A", "B", "C", "D", "E", "F", "G"]);
        let mut s = RotationState::default();
        apply(&mut s, &r, RotationEvent::Start);
        assert!(apply(&mut s, &r, RotationEvent::Start).is_empty());
        assert_eq!(s.count_for("A"), 1);
    }

    #[test]
    fn paused_roster_shrinking_to_five_goes_idle() {
        let mut r = roster(&["A", "B", "C", "D", "E", "F"]);
        let mut s = RotationState::default();
        apply(&mut s, &r, RotationEvent::Start);
        apply(&mut s, &r, RotationEvent::Pause);
        r.pop();
        let cmds = apply(&mut s, &r, RotationEvent::RosterChanged);
        assert_eq!(s.phase, RotationPhase::Idle);
        assert!(s.chosen_players.is_empty());
        assert!(!s.timers.any());
        assert_eq!(cmds, vec![TimerCommand::Cancel(TimerKind::Countdown)]);
    }

    #[test]
    fn idle_roster_change_only_clamps_cursor() {
        let r = roster(&["A", "B"]);
        let mut s = RotationState { cursor: 4, ..RotationState::default() };
        assert!(apply(&mut s, &r, RotationEvent::RosterChanged).is_empty());
        assert_eq!(s.cursor, 0);
        assert_eq!(s.phase, RotationPhase::Idle);
    }

    #[test]
    fn rotate_after_roster_shrinks_goes_idle() {
        let mut r = roster(&["A", "B", "C", "D", "E", "F"]);
        let mut s = RotationState::default();
        apply(&mut s, &r, RotationEvent::Start);
        r.pop();
        retain_roster(&mut s, &r);
        let cmds = apply(&mut s, &r, RotationEvent::Rotate);
        assert_eq!(s.phase, RotationPhase::Idle);
        assert!(s.chosen_players.is_empty());
        assert!(!s.timers.any());
        assert_eq!(cmds.len(), 2);
    }
}
