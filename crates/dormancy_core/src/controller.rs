//! Event wiring of the three per-step stages.
//!
//! The owning simulation loop calls [`SleepController::handle_event`] with
//! the step events in order: [`SimulationEvent::AnimateBegin`] before
//! collision detection, [`SimulationEvent::CollisionEnd`] once contacts are
//! resolved, and [`SimulationEvent::AnimateEnd`] last. Each stage reads the
//! sleeping flags as the previous one left them.

use crate::config::SleepConfig;
use crate::decision::put_groups_to_sleep;
use crate::host::SceneGraph;
use crate::propagation::propagate_wake;
use crate::registry::{InitReport, SleepableRegistry, TrackedGroup};
use crate::timers::update_time_since_wake_up;
use dormancy_data::ContextId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationEvent {
    AnimateBegin,
    CollisionEnd,
    AnimateEnd,
}

/// Transitions caused by one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub asleep: Vec<ContextId>,
    pub woken: Vec<ContextId>,
}

impl StepReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asleep.is_empty() && self.woken.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SleepController {
    config: SleepConfig,
    registry: SleepableRegistry,
}

impl SleepController {
    #[must_use]
    pub fn new(config: SleepConfig) -> Self {
        Self {
            config,
            registry: SleepableRegistry::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SleepConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SleepConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn registry(&self) -> &SleepableRegistry {
        &self.registry
    }

    #[must_use]
    pub fn tracked(&self) -> &[TrackedGroup] {
        self.registry.groups()
    }

    /// Binds every sleep-eligible group of `scene`. Safe to call again after
    /// the scene is reloaded; the initial sleep snapshot is kept.
    pub fn init<S: SceneGraph + ?Sized>(&mut self, scene: &S) -> InitReport {
        self.registry.init(scene)
    }

    /// Restores the initial sleeping flags (when still applicable) and zeroes
    /// the timers.
    pub fn reset<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) -> bool {
        self.registry.reset(scene)
    }

    pub fn handle_event<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        event: SimulationEvent,
    ) -> StepReport {
        match event {
            SimulationEvent::AnimateBegin => StepReport {
                asleep: self.put_nodes_to_sleep(scene),
                woken: Vec::new(),
            },
            SimulationEvent::CollisionEnd => StepReport {
                asleep: Vec::new(),
                woken: self.wake_up_nodes(scene),
            },
            SimulationEvent::AnimateEnd => {
                self.update_time_since_wake_up(&*scene);
                StepReport::default()
            }
        }
    }

    pub fn put_nodes_to_sleep<S: SceneGraph + ?Sized>(&self, scene: &mut S) -> Vec<ContextId> {
        put_groups_to_sleep(&self.registry, scene, &self.config)
    }

    pub fn wake_up_nodes<S: SceneGraph + ?Sized>(&self, scene: &mut S) -> Vec<ContextId> {
        propagate_wake(&self.registry, scene, &self.config)
    }

    pub fn update_time_since_wake_up<S: SceneGraph + ?Sized>(&mut self, scene: &S) {
        update_time_since_wake_up(&mut self.registry, scene);
    }
}
