//! Reference host for the sleep controller: an in-memory scene graph loaded
//! from TOML and a step loop that fires the controller's events.

pub mod model;

pub use dormancy_core::{SimulationEvent, SleepController, StepReport};
pub use model::scene::Scene;
pub use model::simulation::Simulation;
