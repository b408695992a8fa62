//! Scheduling seam between the controller and whatever drives time.
//!
//! The controller never sleeps. It asks a [`Scheduler`] to fire a
//! [`GameTimer`] later, and the driver hands each fired timer back through
//! [`GameController::on_timer`](crate::GameController::on_timer).

use std::time::Duration;

use tracing::{debug, instrument, trace};

use crate::card::CardId;

/// Handle for cancelling a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("timer {}", _0)]
pub struct TimerId(u64);

/// Deferred work the controller asks to be woken for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameTimer {
    /// One second of the level countdown elapsed.
    CountdownTick,
    /// The passive score decay is due.
    DecayTick,
    /// A compared pair finished its reveal.
    ResolvePair {
        /// First card flipped.
        first: CardId,
        /// Second card flipped.
        second: CardId,
    },
    /// A hint highlight expired.
    ClearHint {
        /// Scanned card.
        first: CardId,
        /// Its partner.
        second: CardId,
    },
    /// The combo banner highlight expired.
    ComboFade,
    /// The level-complete dialog is due.
    ShowLevelComplete,
}

/// Something that can fire timers later.
pub trait Scheduler {
    /// Fires `timer` once after `after`.
    fn schedule_once(&mut self, after: Duration, timer: GameTimer) -> TimerId;

    /// Fires `timer` every `period` until cancelled.
    fn schedule_every(&mut self, period: Duration, timer: GameTimer) -> TimerId;

    /// Cancels a timer. Unknown or already fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    timer: GameTimer,
    seq: u64,
}

/// Virtual-clock scheduler.
///
/// Time only moves when the owner advances it, which makes tests
/// deterministic and lets a frontend feed in measured wall-clock time.
/// Timers fire in deadline order; ties fire in the order they were
/// (re)scheduled.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still scheduled.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// True while `id` is still scheduled.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Deadline of the earliest timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Removes and returns the earliest timer due at or before `until`.
    ///
    /// The clock moves to that timer's deadline. Periodic timers are
    /// re-armed one period later before being returned.
    #[instrument(skip(self), level = "trace")]
    pub fn pop_due(&mut self, until: Duration) -> Option<GameTimer> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(position, _)| position)?;

        let mut entry = self.entries.swap_remove(position);
        self.now = self.now.max(entry.due);
        let timer = entry.timer;
        trace!(id = %entry.id, ?timer, now = ?self.now, "Timer fired");

        if let Some(period) = entry.period {
            entry.due += period;
            entry.seq = self.bump_seq();
            self.entries.push(entry);
        }
        Some(timer)
    }

    /// Moves the clock forward to `until` without firing anything.
    ///
    /// Callers drain [`pop_due`](Self::pop_due) first.
    pub fn settle_at(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advances the clock and returns every timer that fired, in order.
    ///
    /// Useful when nothing reacts to the timers in between; the controller
    /// uses [`pop_due`](Self::pop_due) so each callback can cancel later
    /// ones.
    pub fn advance(&mut self, by: Duration) -> Vec<GameTimer> {
        let until = self.now + by;
        let mut fired = Vec::new();
        while let Some(timer) = self.pop_due(until) {
            fired.push(timer);
        }
        self.settle_at(until);
        fired
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn push(&mut self, after: Duration, period: Option<Duration>, timer: GameTimer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            id,
            due: self.now + after,
            period,
            timer,
            seq,
        });
        id
    }
}

impl Scheduler for TimerQueue {
    #[instrument(skip(self), level = "debug")]
    fn schedule_once(&mut self, after: Duration, timer: GameTimer) -> TimerId {
        self.push(after, None, timer)
    }

    #[instrument(skip(self), level = "debug")]
    fn schedule_every(&mut self, period: Duration, timer: GameTimer) -> TimerId {
        // A zero period would refire forever inside a single pop loop.
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), timer)
    }

    fn cancel(&mut self, id: TimerId) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() != before {
            debug!(%id, "Timer cancelled");
        }
    }
}
