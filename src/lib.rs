// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app;
pub mod celebration;
pub mod config;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod texts;
pub mod time_series;
pub mod ui;

/// Interval between event-loop ticks; drives the countdown and the
/// celebration animation.
pub const TICK_RATE_MS: u64 = 100;
