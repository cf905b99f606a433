pub use dormancy_core::{MotionTester, SceneGraph};
pub mod config {
    pub use dormancy_core::config::*;
}
pub mod controller {
    pub use dormancy_core::controller::*;
}
pub mod metrics {
    pub use dormancy_core::metrics::*;
}
pub mod propagation {
    pub use dormancy_core::propagation::*;
}
pub mod registry {
    pub use dormancy_core::registry::*;
}
pub mod state {
    pub use dormancy_data::*;
}

pub mod error;
pub mod scene;
pub mod scene_file;
pub mod simulation;
