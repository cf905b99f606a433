//! Shared data types for the dormancy workspace.
//!
//! These are plain serializable values passed between the host scene and the
//! sleep controller. They carry no simulation behavior of their own.

pub mod data;

pub use data::contact::{CollisionModelRef, Contact};
pub use data::velocity::{Rigid2Deriv, Rigid3Deriv, Velocities};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a context (scene node) owned by the host.
///
/// A handle never keeps the node alive; hosts resolve it on every access.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub u32);

impl ContextId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for ContextId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
