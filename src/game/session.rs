use super::direction::Direction;
use super::effects::{ActiveEffect, FlashState};
use super::engine::{TickOutcome, World};
use super::food::Food;
use super::grid::Grid;
use super::snake::Snake;
use super::speed::tick_interval;
use super::timer::TickTimer;
use crate::audio::{AudioCue, AudioSink};
use crate::highscores::HighScoreStore;
use rand::Rng;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameStatus {
    /// Nothing is happening; the board shows a fresh game
    Idle,

    /// The game has been started and is waiting for the first direction key
    Waiting,

    Running,
    Paused,

    /// The snake crashed
    Over,
}

impl GameStatus {
    /// Is a game underway (possibly paused or not yet moving)?
    pub(crate) fn in_progress(self) -> bool {
        matches!(
            self,
            GameStatus::Waiting | GameStatus::Running | GameStatus::Paused
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum TickError {
    #[error("cannot advance a game that is not running (status: {0:?})")]
    NotRunning(GameStatus),
}

/// One player's run of games: owns the world, the game status, the tick
/// timer, and the external collaborators.
#[derive(Debug)]
pub(crate) struct Session<R> {
    world: World<R>,
    status: GameStatus,
    high_score: u32,
    new_record: bool,
    sound: bool,
    timer: TickTimer,
    store: Box<dyn HighScoreStore>,
    audio: Box<dyn AudioSink>,
}

impl<R: Rng> Session<R> {
    /// Create a session in the `Idle` state.  The high score is read from
    /// `store` once, here; if that fails, it starts at 0.
    pub(crate) fn new(
        grid: Grid,
        rng: R,
        store: Box<dyn HighScoreStore>,
        audio: Box<dyn AudioSink>,
        sound: bool,
    ) -> Session<R> {
        let high_score = store.get().unwrap_or_else(|e| {
            warn!(error = ?e, "could not load high score; starting from 0");
            0
        });
        Session {
            world: World::new(grid, rng),
            status: GameStatus::Idle,
            high_score,
            new_record: false,
            sound,
            timer: TickTimer::default(),
            store,
            audio,
        }
    }

    /// Move from `Idle` or `Over` to `Waiting`.  Starting after a game over
    /// resets the board first.  Returns `false` (doing nothing) if a game is
    /// already in progress.
    pub(crate) fn start(&mut self) -> bool {
        match self.status {
            GameStatus::Idle => (),
            GameStatus::Over => {
                self.world.reset();
                self.new_record = false;
            }
            GameStatus::Waiting | GameStatus::Running | GameStatus::Paused => return false,
        }
        self.set_status(GameStatus::Waiting);
        self.cue(AudioCue::BackgroundStart);
        true
    }

    /// Handle a direction key.  While `Waiting`, this starts the game moving
    /// in `direction`; while `Running`, it queues a turn (ignoring
    /// reversals).  In any other state it does nothing.
    pub(crate) fn steer(&mut self, direction: Direction, now: Instant) {
        match self.status {
            GameStatus::Waiting => {
                self.world.snake_mut().face(direction);
                self.set_status(GameStatus::Running);
                self.rearm(now);
            }
            GameStatus::Running => {
                let snake = self.world.snake_mut();
                if snake.turn(direction) {
                    debug!(pending = ?snake.pending(), "queued turn");
                } else {
                    debug!(?direction, current = ?snake.direction(), "ignoring reversal");
                }
            }
            GameStatus::Idle | GameStatus::Paused | GameStatus::Over => (),
        }
    }

    /// Pause a running game.  Returns `false` if the game was not running.
    pub(crate) fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        let _ = self.timer.cancel();
        self.set_status(GameStatus::Paused);
        true
    }

    /// Resume a paused game.  Returns `false` if the game was not paused.
    pub(crate) fn resume(&mut self, now: Instant) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.set_status(GameStatus::Running);
        self.rearm(now);
        true
    }

    pub(crate) fn toggle_pause(&mut self, now: Instant) -> bool {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(now),
            _ => false,
        }
    }

    /// Throw away the current game, whatever its state, and go back to
    /// `Idle` with a fresh board.  The high score is kept.
    pub(crate) fn restart(&mut self) {
        if self.status.in_progress() {
            self.cue(AudioCue::BackgroundStop);
        }
        let _ = self.timer.cancel();
        self.world.reset();
        self.new_record = false;
        self.set_status(GameStatus::Idle);
    }

    /// Advance the game by one tick.
    ///
    /// # Errors
    ///
    /// Returns `Err` without touching anything if the game is not `Running`.
    pub(crate) fn tick(&mut self, now: Instant) -> Result<TickOutcome, TickError> {
        if self.status != GameStatus::Running {
            return Err(TickError::NotRunning(self.status));
        }
        self.timer.fire(now);
        let report = self.world.advance(now);
        match report.outcome {
            TickOutcome::Ended => self.end_game(),
            TickOutcome::Scored(_) => {
                self.cue(AudioCue::Eat);
                self.rearm(now);
            }
            TickOutcome::Continued => {
                if report.expired.is_some() {
                    self.rearm(now);
                }
            }
        }
        Ok(report.outcome)
    }

    /// Turn sound on or off.  Background music is stopped before muting and
    /// started again after unmuting if a game is in progress.
    pub(crate) fn toggle_sound(&mut self) {
        if self.sound {
            if self.status.in_progress() {
                self.cue(AudioCue::BackgroundStop);
            }
            self.sound = false;
        } else {
            self.sound = true;
            if self.status.in_progress() {
                self.cue(AudioCue::BackgroundStart);
            }
        }
        info!(sound = self.sound, "toggled sound");
    }

    fn end_game(&mut self) {
        let _ = self.timer.cancel();
        self.set_status(GameStatus::Over);
        self.cue(AudioCue::BackgroundStop);
        self.cue(AudioCue::GameOver);
        let score = self.world.score();
        if score > self.high_score {
            info!(score, previous = self.high_score, "new high score");
            self.high_score = score;
            self.new_record = true;
            if let Err(e) = self.store.set(score) {
                warn!(error = ?e, "could not save high score");
            }
        }
    }

    /// Reschedule the tick timer at the interval for the current score and
    /// effect
    fn rearm(&mut self, now: Instant) {
        let interval = self.interval();
        if self.timer.interval().is_some_and(|old| old != interval) {
            info!(?interval, "tick interval changed");
        }
        self.timer.arm(interval, now);
    }
}

impl<R> Session<R> {
    pub(crate) fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// The tick interval for the current score and effect
    pub(crate) fn interval(&self) -> Duration {
        tick_interval(self.world.score(), self.world.effects().active_kind())
    }

    /// A read-only view of everything a renderer needs
    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.world.grid(),
            snake: self.world.snake(),
            foods: self.world.foods().as_slice(),
            active_effect: self.world.effects().active(),
            flash: self.world.effects().flash(),
            status: self.status,
            score: self.world.score(),
            high_score: self.high_score,
            new_record: self.new_record,
            sound: self.sound,
        }
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status != status {
            info!(from = ?self.status, to = ?status, "game status changed");
            self.status = status;
        }
    }

    fn cue(&mut self, cue: AudioCue) {
        if !self.sound {
            return;
        }
        if let Err(e) = self.audio.cue(cue) {
            warn!(%cue, error = %e, "audio cue failed");
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Snapshot<'a> {
    pub(crate) grid: Grid,
    pub(crate) snake: &'a Snake,
    pub(crate) foods: &'a [Food],
    pub(crate) active_effect: Option<ActiveEffect>,
    pub(crate) flash: FlashState,
    pub(crate) status: GameStatus,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    /// Did the game that just ended set a new high score?
    pub(crate) new_record: bool,
    pub(crate) sound: bool,
}
