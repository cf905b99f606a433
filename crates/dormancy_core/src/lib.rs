//! # Dormancy Core
//!
//! Per-step sleep controller for simulated bodies.
//!
//! Groups of bodies whose velocities stay under a threshold are flagged as
//! sleeping so the host can skip them, and sleeping groups are woken again
//! when a moving neighbor touches them. The crate contains:
//! - Motion testers for each supported velocity layout
//! - The registry of groups allowed to change their sleeping state
//! - The three per-step stages: sleep decision, wake propagation through the
//!   contact graph, and the time-since-wake-up accumulator
//! - A controller that wires the stages to the host's step events
//!
//! ## Architecture
//!
//! The host owns the scene and every sleeping flag. It exposes them through
//! the [`SceneGraph`] trait; the controller only keeps handles
//! ([`ContextId`]) and per-group timers.
//!
//! ## Example
//!
//! ```ignore
//! use dormancy_core::{SimulationEvent, SleepConfig, SleepController};
//!
//! let mut controller = SleepController::new(SleepConfig::default());
//! controller.init(&scene);
//! controller.handle_event(&mut scene, SimulationEvent::AnimateBegin);
//! // ... collision detection and response ...
//! controller.handle_event(&mut scene, SimulationEvent::CollisionEnd);
//! controller.handle_event(&mut scene, SimulationEvent::AnimateEnd);
//! ```

/// Configuration of thresholds and the reference host loop
pub mod config;
/// Event wiring of the three per-step stages
pub mod controller;
/// Sleep decision stage, run when a step begins
pub mod decision;
/// Diagnostics reported while binding groups
pub mod error;
/// Collaborator traits implemented by the host scene
pub mod host;
/// Step counters and logging setup
pub mod metrics;
/// Velocity threshold tests, one per velocity layout
pub mod motion;
/// Contact graph construction and wake propagation
pub mod propagation;
/// Tracked groups and the initial sleep snapshot
pub mod registry;
/// Time-since-wake-up accumulation, run when a step ends
pub mod timers;

#[cfg(test)]
pub(crate) mod test_scene;

pub use config::{AppConfig, SimulationConfig, SleepConfig};
pub use controller::{SimulationEvent, SleepController, StepReport};
pub use dormancy_data::{CollisionModelRef, Contact, ContextId, Velocities};
pub use error::BindError;
pub use host::{gather_contacts, ContactManager, SceneGraph};
pub use metrics::{init_logging, SleepMetrics};
pub use motion::MotionTester;
pub use registry::{InitReport, SleepableRegistry, TrackedGroup};
