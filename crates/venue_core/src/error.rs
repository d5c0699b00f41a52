//! Error types for venue construction and the render collaborator.
//!
//! The tick loop itself cannot fail; everything that can go wrong is caught
//! when a venue is built or when a renderer is attached to it.

use thiserror::Error;

/// Rejected venue configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("venue needs at least one station")]
    NoStations,

    #[error("operating window is empty: close tick {close_tick} <= open tick {open_tick}")]
    EmptyWindow { open_tick: u64, close_tick: u64 },

    #[error("arrival rule {rule} has an empty window [{start_tick}, {end_tick})")]
    EmptyRuleWindow {
        rule: usize,
        start_tick: u64,
        end_tick: u64,
    },

    #[error("arrival rule {rule} has probability {probability} outside [0, 1]")]
    ProbabilityOutOfRange { rule: usize, probability: f64 },

    #[error("invalid service time distribution: {0}")]
    InvalidServiceTime(String),

    #[error("snapshot interval must be at least one tick")]
    ZeroSnapshotInterval,
}

/// Failures of the background-simulation / foreground-render pairing.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render cadence must be at least one tick")]
    ZeroCadence,

    #[error("venue state lock was poisoned")]
    Poisoned,

    #[error("simulation worker panicked")]
    WorkerPanicked,

    #[error("frame sink failed: {0}")]
    Sink(String),

    #[error("frame sink I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for running a venue.
#[derive(Debug, Error)]
pub enum VenueError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}
