//! Countdown
//!
//! The daily deal deadline and the polling timer that recomputes the
//! remaining time once per second. Every computation is a pure function of
//! the clock value passed in, so re-running with the same instant yields
//! the same display — and a cancelled timer never recomputes again.

use std::fmt;

use humanize_duration::{Truncate, prelude::DurationExt};
use jiff::{SignedDuration, civil};
use thiserror::Error;

/// Errors raised while parsing a deal deadline.
#[derive(Debug, Error)]
pub enum CountdownError {
    /// The end-time string is not a valid "HH:MM" wall-clock time.
    #[error("invalid deal end time: {0}")]
    InvalidEndTime(String),
}

/// Remaining time, split the way the countdown banner displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLeft {
    /// Whole hours left.
    pub hours: i64,

    /// Minutes left within the hour.
    pub minutes: i64,

    /// Seconds left within the minute.
    pub seconds: i64,
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// A deal deadline at a daily wall-clock time.
///
/// The deadline is "today at `ends_at`"; when that instant has already
/// passed, it rolls over to the same time tomorrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealDeadline {
    ends_at: civil::Time,
}

impl DealDeadline {
    /// Create a deadline at the given daily time.
    #[must_use]
    pub fn new(ends_at: civil::Time) -> Self {
        Self { ends_at }
    }

    /// Parse an "HH:MM" end-time string.
    ///
    /// # Errors
    ///
    /// Returns [`CountdownError::InvalidEndTime`] if the string does not
    /// parse.
    pub fn parse(end_time: &str) -> Result<Self, CountdownError> {
        civil::Time::strptime("%H:%M", end_time)
            .map(Self::new)
            .map_err(|_err| CountdownError::InvalidEndTime(end_time.to_string()))
    }

    /// The daily wall-clock end time.
    pub fn ends_at(&self) -> civil::Time {
        self.ends_at
    }

    /// The next occurrence of the deadline at or after `now`.
    pub fn next_occurrence(&self, now: civil::DateTime) -> civil::DateTime {
        let today = now.date().to_datetime(self.ends_at);

        if today < now {
            today
                .date()
                .tomorrow()
                .map_or(today, |date| date.to_datetime(self.ends_at))
        } else {
            today
        }
    }

    /// Time remaining until the next occurrence of the deadline.
    pub fn remaining(&self, now: civil::DateTime) -> SignedDuration {
        now.duration_until(self.next_occurrence(now))
    }

    /// Remaining time split into the banner's hours/minutes/seconds.
    pub fn time_left(&self, now: civil::DateTime) -> TimeLeft {
        let secs = self.remaining(now).as_secs();

        TimeLeft {
            hours: secs / 3600,
            minutes: (secs / 60) % 60,
            seconds: secs % 60,
        }
    }
}

/// A cancellable one-second polling timer over a deal deadline.
///
/// The timer does not schedule anything itself; the owning view drives
/// [`CountdownTimer::poll`] from its loop at the advertised period. After
/// [`CountdownTimer::cancel`], polling always returns `None` — teardown
/// guarantees no further recomputation.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    deadline: DealDeadline,
    period: SignedDuration,
    cancelled: bool,
}

impl CountdownTimer {
    /// Create a timer over the given deadline with the fixed one-second
    /// period.
    #[must_use]
    pub fn new(deadline: DealDeadline) -> Self {
        Self {
            deadline,
            period: SignedDuration::from_secs(1),
            cancelled: false,
        }
    }

    /// The recomputation period.
    pub fn period(&self) -> SignedDuration {
        self.period
    }

    /// The deadline this timer tracks.
    pub fn deadline(&self) -> DealDeadline {
        self.deadline
    }

    /// Recompute the remaining time for the given clock value, or `None`
    /// once the timer has been cancelled.
    pub fn poll(&self, now: civil::DateTime) -> Option<TimeLeft> {
        if self.cancelled {
            return None;
        }

        Some(self.deadline.time_left(now))
    }

    /// Human-readable remaining span, or `None` once cancelled.
    pub fn humanize(&self, now: civil::DateTime) -> Option<String> {
        if self.cancelled {
            return None;
        }

        let remaining = self.deadline.remaining(now).unsigned_abs();

        Some(remaining.human(Truncate::Second).to_string())
    }

    /// Cancel the timer. Idempotent; polling never resumes.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether the timer has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
