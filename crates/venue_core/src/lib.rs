pub mod clock;
pub mod cost;
pub mod distributions;
pub mod ecs;
pub mod error;
pub mod patterns;
pub mod render;
pub mod runner;
pub mod scenario;
pub mod systems;
pub mod telemetry;
pub mod telemetry_export;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use error::{ConfigError, RenderError, VenueError};
pub use runner::{run, VenueSimulation};
pub use scenario::{ClosingPolicy, VenueConfig};
pub use telemetry::SimulationResult;
