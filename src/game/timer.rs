use std::time::{Duration, Instant};

/// Handle on the single repeating tick schedule.  Arming always replaces any
/// previous schedule, so at most one schedule exists at a time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TickTimer {
    schedule: Option<Schedule>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Schedule {
    interval: Duration,
    next_due: Instant,
}

impl TickTimer {
    /// Cancel any current schedule and start a new one firing every
    /// `interval`, first at `now + interval`.
    pub(crate) fn arm(&mut self, interval: Duration, now: Instant) {
        let _ = self.cancel();
        tracing::debug!(?interval, "arming tick timer");
        self.schedule = Some(Schedule {
            interval,
            next_due: now + interval,
        });
    }

    /// Stop the schedule.  Returns `false` if the timer was not armed.
    pub(crate) fn cancel(&mut self) -> bool {
        self.schedule.take().is_some()
    }

    pub(crate) fn interval(&self) -> Option<Duration> {
        self.schedule.map(|s| s.interval)
    }

    pub(crate) fn next_due(&self) -> Option<Instant> {
        self.schedule.map(|s| s.next_due)
    }

    /// Time left until the next firing, or `None` if the timer is not armed
    pub(crate) fn wait(&self, now: Instant) -> Option<Duration> {
        self.next_due()
            .map(|due| due.saturating_duration_since(now))
    }

    /// Record that the timer fired at `now`; the next firing is one interval
    /// later.
    pub(crate) fn fire(&mut self, now: Instant) {
        if let Some(s) = self.schedule.as_mut() {
            s.next_due = now + s.interval;
        }
    }
}
