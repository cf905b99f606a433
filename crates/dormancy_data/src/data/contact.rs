use crate::ContextId;
use serde::{Deserialize, Serialize};

/// One side of a contact: the collision model's owning context and whether
/// the model is flagged as capable of motion.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionModelRef {
    pub context: ContextId,
    pub moving: bool,
}

impl CollisionModelRef {
    #[must_use]
    pub fn new(context: ContextId, moving: bool) -> Self {
        Self { context, moving }
    }
}

/// A resolved contact between two collision models.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contact {
    pub first: CollisionModelRef,
    pub second: CollisionModelRef,
}

impl Contact {
    #[must_use]
    pub fn new(first: CollisionModelRef, second: CollisionModelRef) -> Self {
        Self { first, second }
    }

    #[must_use]
    pub fn collision_models(&self) -> (CollisionModelRef, CollisionModelRef) {
        (self.first, self.second)
    }

    /// Both models can move. Contacts against static geometry never wake anything.
    #[must_use]
    pub fn is_between_moving_models(&self) -> bool {
        self.first.moving && self.second.moving
    }
}
