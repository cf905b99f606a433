//! Interfaces the host simulation provides to the controller.
//!
//! The controller never owns scene data. Everything it reads or writes goes
//! through these traits, addressed by [`ContextId`] handles.

use dormancy_data::{Contact, ContextId, Velocities};

/// Source of the contacts resolved during the current collision phase.
pub trait ContactManager {
    fn contacts(&self) -> Vec<Contact>;
}

/// Scene graph of the host simulation.
///
/// Handles that no longer resolve to a node behave like an awake node
/// without state: `is_sleeping` returns `false` and `set_sleeping` does
/// nothing.
pub trait SceneGraph {
    /// Root context, the starting point of every traversal.
    fn root(&self) -> ContextId;

    /// All contexts below `root` that may change their sleeping state and
    /// carry a mechanical state. Children are listed before their parents and
    /// each context appears once.
    fn collect_sleep_eligible_groups(&self, root: ContextId) -> Vec<ContextId>;

    /// Human-readable name, for diagnostics only.
    fn name(&self, context: ContextId) -> &str;

    /// Velocity vector of the mechanical state attached to `context`.
    fn velocities(&self, context: ContextId) -> Option<&Velocities>;

    fn is_sleeping(&self, context: ContextId) -> bool;

    fn set_sleeping(&mut self, context: ContextId, sleeping: bool);

    /// Whether the context is flagged as allowed to change its sleeping state.
    fn can_change_sleeping_state(&self, context: ContextId) -> bool;

    /// Direct parents of `context`. Parent links may form cycles.
    fn parents(&self, context: ContextId) -> Vec<ContextId>;

    /// Simulated time elapsed in `context` during one step.
    fn dt(&self, context: ContextId) -> f64;

    /// The scene-wide contact manager, if the scene has one.
    fn contact_manager(&self) -> Option<&dyn ContactManager>;

    /// Every contact object found by searching down from the root. Used when
    /// the scene has no contact manager.
    fn search_contacts(&self) -> Vec<Contact>;
}

/// Contacts of the current collision phase: from the contact manager when
/// present, otherwise from a tree-wide search.
pub fn gather_contacts<S: SceneGraph + ?Sized>(scene: &S) -> Vec<Contact> {
    match scene.contact_manager() {
        Some(manager) => manager.contacts(),
        None => scene.search_contacts(),
    }
}
