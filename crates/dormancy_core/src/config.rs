//! Configuration management for the sleep controller.
//!
//! Strongly-typed configuration structures that map to a `config.toml` file.
//! Every field has a default, so a file only needs the values it overrides.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [sleep]
//! speed_threshold = 0.001
//! rotation_threshold = 0.0
//! min_time_since_wake_up = 0.1
//! verbose = false
//!
//! [simulation]
//! dt = 0.01
//! steps = 100
//! damping = 0.9
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Thresholds read by the sleep decision at the beginning of every step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SleepConfig {
    /// Speed under which a particle or frame is considered immobile.
    pub speed_threshold: f64,
    /// Angular speed under which a frame is considered immobile.
    /// Zero disables the angular test.
    pub rotation_threshold: f64,
    /// A group must have been awake at least this long before it may sleep.
    pub min_time_since_wake_up: f64,
    /// Report every sleep and wake transition at info level.
    pub verbose: bool,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            speed_threshold: 0.001,
            rotation_threshold: 0.0,
            min_time_since_wake_up: 0.1,
            verbose: false,
        }
    }
}

/// Parameters of the reference host loop.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Time step applied to nodes that do not set their own.
    pub dt: f64,
    /// Number of steps run by the headless CLI.
    pub steps: u64,
    /// Per-step velocity damping of awake groups in the reference host.
    pub damping: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            steps: 100,
            damping: 0.9,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub sleep: SleepConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Checks every value against its documented range.
    pub fn validate(&self) -> anyhow::Result<()> {
        // Sleep thresholds
        anyhow::ensure!(
            self.sleep.speed_threshold.is_finite() && self.sleep.speed_threshold >= 0.0,
            "Speed threshold must be finite and non-negative"
        );
        anyhow::ensure!(
            self.sleep.rotation_threshold.is_finite() && self.sleep.rotation_threshold >= 0.0,
            "Rotation threshold must be finite and non-negative"
        );
        anyhow::ensure!(
            self.sleep.min_time_since_wake_up.is_finite()
                && self.sleep.min_time_since_wake_up >= 0.0,
            "Minimum time since wake up must be finite and non-negative"
        );

        // Host loop
        anyhow::ensure!(
            self.simulation.dt.is_finite() && self.simulation.dt > 0.0,
            "Time step must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.simulation.damping),
            "Damping must be in [0.0, 1.0]"
        );

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, or returns the defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
