//! Error types for building scenes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    /// Two nodes share a name
    #[error("Duplicate node name: {0}")]
    DuplicateNode(String),

    /// A parent, contact endpoint or root refers to a node that does not exist
    #[error("Unknown node '{name}' referenced by {referenced_by}")]
    UnknownNode { name: String, referenced_by: String },

    /// A time step that is not a positive finite number
    #[error("Invalid time step {dt} on node {node}")]
    InvalidTimeStep { node: String, dt: f64 },

    /// TOML parsing errors
    #[error("Scene parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),
}

/// Result type alias for scene construction.
pub type Result<T> = std::result::Result<T, SceneError>;

impl SceneError {
    #[must_use]
    pub fn unknown<S: Into<String>, R: Into<String>>(name: S, referenced_by: R) -> Self {
        Self::UnknownNode {
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }
}
