//! TOML scene descriptions.
//!
//! ```toml
//! root = "root"
//! dt = 0.01
//!
//! [[nodes]]
//! name = "box"
//! parents = ["root"]
//! can_sleep = true
//! velocities = { template = "Vec3", values = [[0.0, 0.0, 0.0]] }
//!
//! [[contacts]]
//! between = ["box", "floor"]
//! ```

use crate::model::error::{Result, SceneError};
use crate::model::scene::{ContactList, Scene, SceneNode};
use dormancy_core::host::SceneGraph;
use dormancy_data::Velocities;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_root() -> String {
    "root".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SceneDescription {
    #[serde(default = "default_root")]
    pub root: String,
    /// Scene time step. Falls back to the configured simulation step.
    #[serde(default)]
    pub dt: Option<f64>,
    /// Route contacts through a scene-wide contact manager. When false each
    /// contact is stored on the node of its first model.
    #[serde(default = "default_true")]
    pub contact_manager: bool,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    #[serde(default)]
    pub contacts: Vec<ContactDescription>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NodeDescription {
    pub name: String,
    /// Defaults to the root when empty.
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub can_sleep: bool,
    #[serde(default)]
    pub sleeping: bool,
    /// Overrides the scene time step for this node.
    #[serde(default)]
    pub dt: Option<f64>,
    #[serde(default)]
    pub velocities: Option<Velocities>,
    #[serde(default = "default_true")]
    pub moving: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContactDescription {
    pub between: [String; 2],
}

impl SceneDescription {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

fn check_dt(node: &str, dt: f64) -> Result<f64> {
    if dt.is_finite() && dt > 0.0 {
        Ok(dt)
    } else {
        Err(SceneError::InvalidTimeStep {
            node: node.to_string(),
            dt,
        })
    }
}

impl Scene {
    /// Builds a scene in two passes: nodes first, then parent links, so a
    /// description may reference nodes declared later and may form cycles.
    pub fn from_description(description: &SceneDescription, default_dt: f64) -> Result<Self> {
        let dt = check_dt(&description.root, description.dt.unwrap_or(default_dt))?;
        let mut scene = Scene::new(&description.root, dt);
        let root = scene.root();

        let mut created = Vec::with_capacity(description.nodes.len());
        for desc in &description.nodes {
            let node = SceneNode {
                name: desc.name.clone(),
                can_change_sleeping_state: desc.can_sleep,
                sleeping: desc.sleeping,
                dt: check_dt(&desc.name, desc.dt.unwrap_or(dt))?,
                state: desc.velocities.clone(),
                moving: desc.moving,
                contacts: Vec::new(),
            };
            created.push(scene.add_node(node, &[])?);
        }

        for (desc, &id) in description.nodes.iter().zip(&created) {
            if desc.parents.is_empty() {
                scene.add_parent(id, root)?;
                continue;
            }
            for parent in &desc.parents {
                let parent_id = scene
                    .find(parent)
                    .ok_or_else(|| SceneError::unknown(parent.as_str(), desc.name.as_str()))?;
                scene.add_parent(id, parent_id)?;
            }
        }

        if description.contact_manager {
            scene.set_contact_manager(Some(ContactList::default()));
        }
        for contact in &description.contacts {
            let [a, b] = &contact.between;
            let side = |name: &String| {
                scene
                    .find(name)
                    .ok_or_else(|| SceneError::unknown(name.as_str(), "contacts"))
            };
            let (a, b) = (side(a)?, side(b)?);
            let resolved = scene.touch(a, b)?;
            scene.add_contact(resolved)?;
        }

        Ok(scene)
    }

    pub fn load<P: AsRef<Path>>(path: P, default_dt: f64) -> Result<Self> {
        Self::from_description(&SceneDescription::load(path)?, default_dt)
    }
}
