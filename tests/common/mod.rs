use dormancy_lib::model::config::AppConfig;
use dormancy_lib::model::scene::Scene;
use dormancy_lib::model::scene_file::{ContactDescription, NodeDescription, SceneDescription};
use dormancy_lib::model::simulation::Simulation;
use dormancy_lib::model::state::{Rigid2Deriv, Rigid3Deriv, Velocities};

#[allow(dead_code)]
pub fn still(particles: usize) -> Velocities {
    Velocities::Vec3(vec![[0.0; 3]; particles])
}

#[allow(dead_code)]
pub fn moving(speed: f64) -> Velocities {
    Velocities::Vec3(vec![[speed, 0.0, 0.0]])
}

#[allow(dead_code)]
pub fn spinning_2d(linear: [f64; 2], angular: f64) -> Velocities {
    Velocities::Rigid2(vec![Rigid2Deriv { linear, angular }])
}

#[allow(dead_code)]
pub fn spinning_3d(linear: [f64; 3], angular: [f64; 3]) -> Velocities {
    Velocities::Rigid3(vec![Rigid3Deriv { linear, angular }])
}

/// Builds test scenes through the same description path as scene files.
#[allow(dead_code)]
pub struct SceneBuilder {
    config: AppConfig,
    description: SceneDescription,
}

#[allow(dead_code)]
impl SceneBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            description: SceneDescription {
                root: "root".to_string(),
                dt: None,
                contact_manager: true,
                nodes: Vec::new(),
                contacts: Vec::new(),
            },
        }
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_node(mut self, node: NodeDescription) -> Self {
        self.description.nodes.push(node);
        self
    }

    pub fn with_body(self, name: &str, velocities: Velocities) -> Self {
        self.with_body_under(name, &[], velocities)
    }

    pub fn with_body_under(self, name: &str, parents: &[&str], velocities: Velocities) -> Self {
        self.with_node(NodeDescription {
            name: name.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            can_sleep: true,
            sleeping: false,
            dt: None,
            velocities: Some(velocities),
            moving: true,
        })
    }

    /// A moving node the controller does not track.
    pub fn with_untracked(self, name: &str, velocities: Velocities) -> Self {
        self.with_node(NodeDescription {
            name: name.to_string(),
            parents: Vec::new(),
            can_sleep: false,
            sleeping: false,
            dt: None,
            velocities: Some(velocities),
            moving: true,
        })
    }

    /// Static geometry, such as a floor.
    pub fn with_static(self, name: &str) -> Self {
        self.with_node(NodeDescription {
            name: name.to_string(),
            parents: Vec::new(),
            can_sleep: false,
            sleeping: false,
            dt: None,
            velocities: None,
            moving: false,
        })
    }

    pub fn asleep(mut self, name: &str) -> Self {
        if let Some(node) = self.description.nodes.iter_mut().find(|n| n.name == name) {
            node.sleeping = true;
        }
        self
    }

    pub fn with_contact(mut self, a: &str, b: &str) -> Self {
        self.description.contacts.push(ContactDescription {
            between: [a.to_string(), b.to_string()],
        });
        self
    }

    pub fn without_contact_manager(mut self) -> Self {
        self.description.contact_manager = false;
        self
    }

    pub fn build_scene(&self) -> Scene {
        Scene::from_description(&self.description, self.config.simulation.dt)
            .expect("Failed to build scene in test builder")
    }

    pub fn build(self) -> Simulation {
        let scene = self.build_scene();
        Simulation::new(scene, self.config).expect("Failed to create simulation in test builder")
    }
}
