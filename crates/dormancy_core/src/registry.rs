//! Registry of the groups the controller is allowed to put to sleep.
//!
//! The registry only holds handles and per-group timers. The sleeping flag
//! itself stays on the host's context.

use crate::error::BindError;
use crate::host::SceneGraph;
use crate::motion::MotionTester;
use dormancy_data::ContextId;
use std::collections::HashMap;

/// A sleep-eligible group bound to the tester that reads its velocities.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedGroup {
    pub context: ContextId,
    pub tester: MotionTester,
    /// Simulated time spent awake since the group last woke up.
    pub time_since_wake_up: f64,
}

/// Outcome of one (re-)initialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitReport {
    pub tracked: usize,
    pub rejected: Vec<BindError>,
}

#[derive(Debug, Clone, Default)]
pub struct SleepableRegistry {
    groups: Vec<TrackedGroup>,
    index: HashMap<ContextId, usize>,
    initial_state: Vec<bool>,
}

impl SleepableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the tracked set from the scene.
    ///
    /// Groups whose velocity layout no tester can read are reported and left
    /// out. The sleeping flags seen by the first initialization that tracks
    /// anything are kept for [`reset`](Self::reset) and never replaced.
    pub fn init<S: SceneGraph + ?Sized>(&mut self, scene: &S) -> InitReport {
        self.groups.clear();
        self.index.clear();

        let mut rejected = Vec::new();
        for context in scene.collect_sleep_eligible_groups(scene.root()) {
            match bind(scene, context) {
                Ok(tester) => {
                    if self.index.contains_key(&context) {
                        continue;
                    }
                    self.index.insert(context, self.groups.len());
                    self.groups.push(TrackedGroup {
                        context,
                        tester,
                        time_since_wake_up: 0.0,
                    });
                }
                Err(err) => {
                    tracing::warn!(context = %context, "{err}");
                    rejected.push(err);
                }
            }
        }

        if self.initial_state.is_empty() {
            self.initial_state = self
                .groups
                .iter()
                .map(|g| scene.is_sleeping(g.context))
                .collect();
        }

        tracing::info!(
            tracked = self.groups.len(),
            rejected = rejected.len(),
            "found {} nodes that can change their sleep state",
            self.groups.len()
        );

        InitReport {
            tracked: self.groups.len(),
            rejected,
        }
    }

    /// Restores the initial sleeping flags and zeroes every timer.
    ///
    /// The flags are restored only when the snapshot still has one entry per
    /// tracked group; otherwise the scene changed since it was taken and the
    /// flags are left untouched. Returns whether the flags were restored.
    pub fn reset<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) -> bool {
        let restored = self.initial_state.len() == self.groups.len();
        if restored {
            for (group, &sleeping) in self.groups.iter().zip(&self.initial_state) {
                scene.set_sleeping(group.context, sleeping);
            }
        } else {
            tracing::warn!(
                snapshot = self.initial_state.len(),
                tracked = self.groups.len(),
                "Initial sleep state does not match the tracked groups, keeping current flags"
            );
        }

        for group in &mut self.groups {
            group.time_since_wake_up = 0.0;
        }
        restored
    }

    #[must_use]
    pub fn groups(&self) -> &[TrackedGroup] {
        &self.groups
    }

    pub(crate) fn groups_mut(&mut self) -> &mut [TrackedGroup] {
        &mut self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Position of `context` in the tracked order.
    #[must_use]
    pub fn index_of(&self, context: ContextId) -> Option<usize> {
        self.index.get(&context).copied()
    }

    #[must_use]
    pub fn initial_state(&self) -> &[bool] {
        &self.initial_state
    }

    /// Number of tracked groups the scene currently reports as sleeping.
    pub fn sleeping_count<S: SceneGraph + ?Sized>(&self, scene: &S) -> usize {
        self.groups
            .iter()
            .filter(|g| scene.is_sleeping(g.context))
            .count()
    }
}

fn bind<S: SceneGraph + ?Sized>(scene: &S, context: ContextId) -> Result<MotionTester, BindError> {
    let velocities = scene
        .velocities(context)
        .ok_or_else(|| BindError::MissingState {
            context,
            node: scene.name(context).to_string(),
        })?;

    MotionTester::bind(velocities).ok_or_else(|| BindError::UnsupportedState {
        context,
        node: scene.name(context).to_string(),
        template: velocities.template_name().to_string(),
    })
}
