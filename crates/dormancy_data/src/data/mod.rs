//! Core data structures exchanged with the host scene.

pub mod contact;
pub mod velocity;
