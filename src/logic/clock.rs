//! Rotation clock: owns the countdown and rotation timers of one workspace.
//!
//! A single task holds the state, the roster and both optional intervals.
//! Control commands and timer ticks are handled one at a time by that task
//! and all of them go through [`rotation::apply`].

use crate::logic::rotation;
use crate::models::{Player, RotationEvent, RotationState, TimerCommand, TimerKind};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval};

enum ClockCommand {
    Event(RotationEvent, oneshot::Sender<RotationState>),
    Roster(Vec<Player>, oneshot::Sender<RotationState>),
}

/// Handle to a running rotation clock. Dropping it stops the task and both timers.
pub struct RotationClock {
    commands: mpsc::UnboundedSender<ClockCommand>,
    snapshot: watch::Receiver<RotationState>,
    task: JoinHandle<()>,
}

impl RotationClock {
    /// Spawn the clock task on the current tokio runtime.
    pub fn spawn(roster: Vec<Player>) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let (publish, snapshot) = watch::channel(RotationState::default());
        let runner = Runner {
            state: RotationState::default(),
            roster,
            countdown: None,
            rotation: None,
            publish,
        };
        let task = tokio::spawn(runner.run(rx));
        Self {
            commands,
            snapshot,
            task,
        }
    }

    pub async fn start(&self) -> RotationState {
        self.send_event(RotationEvent::Start).await
    }

    pub async fn pause(&self) -> RotationState {
        self.send_event(RotationEvent::Pause).await
    }

    pub async fn reset(&self) -> RotationState {
        self.send_event(RotationEvent::Reset).await
    }

    /// Replace the roster the clock rotates over (after an add, remove or reorder).
    pub async fn set_roster(&self, roster: Vec<Player>) -> RotationState {
        let (reply, rx) = oneshot::channel();
        self.request(ClockCommand::Roster(roster, reply), rx).await
    }

    /// Latest published state.
    pub fn snapshot(&self) -> RotationState {
        self.snapshot.borrow().clone()
    }

    /// Receiver that sees every published state.
    pub fn subscribe(&self) -> watch::Receiver<RotationState> {
        self.snapshot.clone()
    }

    async fn send_event(&self, event: RotationEvent) -> RotationState {
        let (reply, rx) = oneshot::channel();
        self.request(ClockCommand::Event(event, reply), rx).await
    }

    async fn request(&self, command: ClockCommand, rx: oneshot::Receiver<RotationState>) -> RotationState {
        if self.commands.send(command).is_err() {
            log::warn!("Rotation clock task is gone; returning last snapshot");
            return self.snapshot();
        }
        match rx.await {
            Ok(state) => state,
            Err(_) => self.snapshot(),
        }
    }
}

impl Drop for RotationClock {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Runner {
    state: RotationState,
    roster: Vec<Player>,
    countdown: Option<Interval>,
    rotation: Option<Interval>,
    publish: watch::Sender<RotationState>,
}

impl Runner {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<ClockCommand>) {
        loop {
            // Rotation before countdown: when both are due, the batch advances
            // first and the countdown tick lands on the fresh interval.
            tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(ClockCommand::Event(event, reply)) => {
                        self.handle(event);
                        let _ = reply.send(self.state.clone());
                    }
                    Some(ClockCommand::Roster(roster, reply)) => {
                        self.roster = roster;
                        self.handle(RotationEvent::RosterChanged);
                        let _ = reply.send(self.state.clone());
                    }
                    None => break,
                },
                _ = next_tick(&mut self.rotation) => self.handle(RotationEvent::Rotate),
                _ = next_tick(&mut self.countdown) => self.handle(RotationEvent::Tick),
            }
        }
        log::debug!("Rotation clock stopped");
    }

    fn handle(&mut self, event: RotationEvent) {
        let commands = rotation::apply(&mut self.state, &self.roster, event);
        for command in commands {
            match command {
                TimerCommand::Arm(kind) => *self.slot(kind) = Some(new_interval(kind)),
                TimerCommand::Cancel(kind) => *self.slot(kind) = None,
            }
        }
        if matches!(event, RotationEvent::Rotate) {
            log::info!(
                "Rotated to cursor {}: {} player(s) out",
                self.state.cursor,
                self.state.chosen_players.len()
            );
        }
        self.publish();
    }

    fn slot(&mut self, kind: TimerKind) -> &mut Option<Interval> {
        match kind {
            TimerKind::Countdown => &mut self.countdown,
            TimerKind::Rotation => &mut self.rotation,
        }
    }

    fn publish(&self) {
        self.publish.send_replace(self.state.clone());
    }
}

/// First tick one period from now, then every period.
fn new_interval(kind: TimerKind) -> Interval {
    let period = kind.period();
    interval_at(Instant::now() + period, period)
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
