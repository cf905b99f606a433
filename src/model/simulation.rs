use crate::model::scene::Scene;
use anyhow::Result;
use dormancy_core::config::AppConfig;
use dormancy_core::controller::{SimulationEvent, SleepController, StepReport};
use dormancy_core::host::SceneGraph;
use dormancy_core::metrics::SleepMetrics;
use dormancy_core::registry::InitReport;

/// Reference host loop driving a [`SleepController`] over a [`Scene`].
pub struct Simulation {
    pub scene: Scene,
    pub controller: SleepController,
    pub config: AppConfig,
    pub metrics: SleepMetrics,
    init_report: InitReport,
}

impl Simulation {
    pub fn new(scene: Scene, config: AppConfig) -> Result<Self> {
        config.validate()?;
        let controller = SleepController::new(config.sleep.clone());
        let mut sim = Self {
            scene,
            controller,
            config,
            metrics: SleepMetrics::new(),
            init_report: InitReport::default(),
        };
        sim.init();
        Ok(sim)
    }

    fn init(&mut self) {
        self.init_report = self.controller.init(&self.scene);
        tracing::debug!(
            nodes = self.scene.node_count(),
            tracked = self.init_report.tracked,
            "Simulation bound to scene"
        );
    }

    #[must_use]
    pub fn init_report(&self) -> &InitReport {
        &self.init_report
    }

    /// One full step: sleep decision, integration, wake propagation, timers.
    pub fn step(&mut self) -> StepReport {
        let begin = self
            .controller
            .handle_event(&mut self.scene, SimulationEvent::AnimateBegin);

        self.scene.damp_awake(self.config.simulation.damping);

        let collision = self
            .controller
            .handle_event(&mut self.scene, SimulationEvent::CollisionEnd);
        self.controller
            .handle_event(&mut self.scene, SimulationEvent::AnimateEnd);

        let report = StepReport {
            asleep: begin.asleep,
            woken: collision.woken,
        };
        self.metrics.record_step(
            report.asleep.len(),
            report.woken.len(),
            self.sleeping_count(),
        );
        report
    }

    /// Runs `steps` steps and returns every transition in order.
    pub fn run(&mut self, steps: u64) -> StepReport {
        let mut total = StepReport::default();
        for _ in 0..steps {
            let report = self.step();
            total.asleep.extend(report.asleep);
            total.woken.extend(report.woken);
        }
        total
    }

    /// Restores the initial sleeping flags. Returns false when the tracked
    /// set no longer matches the saved flags.
    pub fn reset(&mut self) -> bool {
        self.controller.reset(&mut self.scene)
    }

    /// Swaps in a new scene and re-binds the controller to it.
    pub fn reload(&mut self, scene: Scene) -> &InitReport {
        self.scene = scene;
        self.init();
        &self.init_report
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.metrics.step_count()
    }

    #[must_use]
    pub fn sleeping_count(&self) -> usize {
        self.controller.registry().sleeping_count(&self.scene)
    }

    /// Sleeping flag of the node called `name`, if it exists.
    #[must_use]
    pub fn is_sleeping(&self, name: &str) -> Option<bool> {
        self.scene.find(name).map(|id| self.scene.is_sleeping(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default();
        config.simulation.damping = 2.0;
        assert!(Simulation::new(Scene::demo(0.01).unwrap(), config).is_err());
    }

    #[test]
    fn test_demo_settles() {
        let scene = Scene::demo(0.01).unwrap();
        let mut sim = Simulation::new(scene, AppConfig::default()).unwrap();
        assert_eq!(sim.init_report().tracked, 2);

        sim.run(200);

        assert_eq!(sim.step_count(), 200);
        assert_eq!(sim.sleeping_count(), 2);
        assert_eq!(sim.is_sleeping("ball"), Some(true));
        assert_eq!(sim.is_sleeping("floor"), Some(false));
    }

    #[test]
    fn test_reset_wakes_settled_demo() {
        let scene = Scene::demo(0.01).unwrap();
        let mut sim = Simulation::new(scene, AppConfig::default()).unwrap();
        sim.run(200);

        assert!(sim.reset());
        assert_eq!(sim.sleeping_count(), 0);
        assert!(sim.controller.tracked().iter().all(|g| g.time_since_wake_up == 0.0));
    }
}
