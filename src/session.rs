use crate::stats::{matching_chars, Stats};
use crate::time_series::WpmSample;
use crate::TICK_RATE_MS;
use itertools::{EitherOrBoth, Itertools};
use std::time::SystemTime;

/// Lifecycle of a typing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Running,
    Completed,
    TimedOut,
}

impl SessionStatus {
    pub fn is_over(self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::TimedOut)
    }
}

/// Per-character comparison of the input against the target text,
/// consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharOutcome {
    Correct,
    Incorrect,
    Pending,
}

/// A typing session over one target text.
///
/// Owns the target, the current input, the countdown for timed
/// sessions, and the frozen stats once the session is over. Reacts to
/// two events: an input change and a timer tick.
#[derive(Debug)]
pub struct Session {
    pub target: String,
    input: String,
    started_at: Option<SystemTime>,
    status: SessionStatus,
    number_of_secs: Option<f64>,
    seconds_remaining: Option<f64>,
    stats: Option<Stats>,
    samples: Vec<WpmSample>,
}

impl Session {
    pub fn new(target: String, number_of_secs: Option<f64>) -> Self {
        Self {
            target,
            input: String::new(),
            started_at: None,
            status: SessionStatus::Idle,
            number_of_secs,
            seconds_remaining: number_of_secs,
            stats: None,
            samples: Vec::new(),
        }
    }

    /// Back to a fresh idle session, optionally over a new target text.
    pub fn reset(&mut self, new_target: Option<String>) {
        if let Some(target) = new_target {
            self.target = target;
        }
        self.input.clear();
        self.started_at = None;
        self.status = SessionStatus::Idle;
        self.seconds_remaining = self.number_of_secs;
        self.stats = None;
        self.samples.clear();
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn seconds_remaining(&self) -> Option<f64> {
        self.seconds_remaining
    }

    pub fn is_timed(&self) -> bool {
        self.number_of_secs.is_some()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Stats become available when the session completes or times out,
    /// and never change afterwards.
    pub fn stats(&self) -> Option<Stats> {
        self.stats
    }

    /// WPM progress recorded on each input change, for the results
    /// chart.
    pub fn samples(&self) -> &[WpmSample] {
        &self.samples
    }

    /// Replace the current input with the latest value of the input
    /// field.
    ///
    /// The first character starts the clock; matching the target text
    /// completes the session. Input arriving after the session is over
    /// is discarded.
    pub fn on_input(&mut self, new_value: &str) {
        if self.status.is_over() {
            return;
        }

        if self.started_at.is_none() && new_value.chars().count() == 1 {
            self.started_at = Some(SystemTime::now());
            self.status = SessionStatus::Running;
        }

        self.input.clear();
        self.input.push_str(new_value);
        self.record_sample();

        if self.input == self.target {
            self.complete(SessionStatus::Completed);
        }
    }

    /// Advance the countdown by one tick.
    ///
    /// Only meaningful for timed sessions that are running: the
    /// countdown starts with the first keystroke and freezes once the
    /// session is over.
    pub fn on_tick(&mut self) {
        if self.status != SessionStatus::Running {
            return;
        }
        let Some(remaining) = self.seconds_remaining else {
            return;
        };

        let remaining = remaining - TICK_RATE_MS as f64 / 1000.0;
        if remaining <= 0.0 {
            self.seconds_remaining = Some(0.0);
            self.complete(SessionStatus::TimedOut);
        } else {
            self.seconds_remaining = Some(remaining);
        }
    }

    /// Classify every character of the target against the input typed
    /// so far. Input beyond the target length carries no outcome.
    pub fn char_outcomes(&self) -> Vec<CharOutcome> {
        self.target
            .chars()
            .zip_longest(self.input.chars())
            .filter_map(|pair| match pair {
                EitherOrBoth::Both(t, i) => Some(if t == i {
                    CharOutcome::Correct
                } else {
                    CharOutcome::Incorrect
                }),
                EitherOrBoth::Left(_) => Some(CharOutcome::Pending),
                EitherOrBoth::Right(_) => None,
            })
            .collect()
    }

    fn complete(&mut self, status: SessionStatus) {
        let elapsed = self.elapsed_minutes();
        self.status = status;
        self.stats = Some(Stats::from_attempt(&self.target, &self.input, elapsed));
    }

    // Timed sessions measure consumed countdown budget; untimed
    // sessions measure wall clock since the first keystroke. A session
    // that completes before the clock ever started reports zero
    // elapsed time, which the stats guard turns into 0 WPM.
    fn elapsed_minutes(&self) -> f64 {
        match (self.number_of_secs, self.seconds_remaining) {
            (Some(limit), Some(remaining)) => (limit - remaining) / 60.0,
            _ => self
                .started_at
                .and_then(|t| t.elapsed().ok())
                .map(|d| d.as_secs_f64() / 60.0)
                .unwrap_or(0.0),
        }
    }

    fn record_sample(&mut self) {
        let Some(started) = self.started_at else {
            return;
        };
        // Sub-second keypresses are folded into the first whole second
        let secs = started
            .elapsed()
            .unwrap_or_default()
            .as_secs_f64()
            .max(1.0);
        let correct = matching_chars(&self.target, &self.input) as f64;
        self.samples
            .push(WpmSample::new(secs, correct / 5.0 * (60.0 / secs)));
    }
}
