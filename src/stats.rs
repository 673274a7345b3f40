//! Words-per-minute and accuracy calculations for a finished attempt.

/// Result metrics for a session, rounded to whole numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub wpm: f64,
    pub accuracy: f64,
}

impl Stats {
    /// Compute stats for an attempt at `target` that took
    /// `elapsed_minutes`.
    ///
    /// WPM counts the words of the target text, not the words typed;
    /// accuracy counts position-wise matching characters against the
    /// target length. A zero elapsed time yields 0 WPM rather than a
    /// division by zero.
    pub fn from_attempt(target: &str, input: &str, elapsed_minutes: f64) -> Self {
        let words = word_count(target) as f64;
        let wpm = if elapsed_minutes > 0.0 {
            (words / elapsed_minutes).round()
        } else {
            0.0
        };

        let target_len = target.chars().count();
        let accuracy = if target_len == 0 {
            100.0
        } else {
            (matching_chars(target, input) as f64 / target_len as f64 * 100.0).round()
        };

        Self { wpm, accuracy }
    }

    /// Fast and clean sessions earn a confetti burst on the results
    /// screen.
    pub fn merits_celebration(&self) -> bool {
        self.wpm > 40.0 && self.accuracy > 90.0
    }
}

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of positions where input and target hold the same code point.
/// Characters the user has not reached yet count as mismatches; input
/// beyond the target length is ignored.
pub fn matching_chars(target: &str, input: &str) -> usize {
    target
        .chars()
        .zip(input.chars())
        .filter(|(t, i)| t == i)
        .count()
}
