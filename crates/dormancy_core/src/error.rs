//! Diagnostics produced while binding groups to motion testers.
//!
//! None of these abort initialization: the offending group is left out of the
//! tracked set and the error is reported.

use dormancy_data::ContextId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// No motion tester reads this velocity layout.
    #[error("SleepController can not control node {node} of type {template}")]
    UnsupportedState {
        context: ContextId,
        node: String,
        template: String,
    },

    /// The context was listed as sleep-eligible but exposes no velocities.
    #[error("SleepController found no mechanical state in node {node}")]
    MissingState { context: ContextId, node: String },
}

impl BindError {
    #[must_use]
    pub fn context(&self) -> ContextId {
        match self {
            Self::UnsupportedState { context, .. } | Self::MissingState { context, .. } => *context,
        }
    }
}
