use crate::model::error::{Result, SceneError};
use dormancy_core::host::{ContactManager, SceneGraph};
use dormancy_data::{CollisionModelRef, Contact, ContextId, Rigid3Deriv, Velocities};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, DfsPostOrder};
use petgraph::Direction;
use std::collections::HashMap;

/// A context of the scene: flags, an optional mechanical state, and the
/// contact objects it holds.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub can_change_sleeping_state: bool,
    pub sleeping: bool,
    pub dt: f64,
    pub state: Option<Velocities>,
    /// Whether the collision model of this node can move.
    pub moving: bool,
    /// Contacts owned by this node, found by the tree-wide search.
    pub contacts: Vec<Contact>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, dt: f64) -> Self {
        Self {
            name: name.into(),
            can_change_sleeping_state: false,
            sleeping: false,
            dt,
            state: None,
            moving: true,
            contacts: Vec::new(),
        }
    }
}

/// Scene-wide contact manager.
#[derive(Debug, Clone, Default)]
pub struct ContactList {
    pub contacts: Vec<Contact>,
}

impl ContactManager for ContactList {
    fn contacts(&self) -> Vec<Contact> {
        self.contacts.clone()
    }
}

/// In-memory scene graph. Edges point from parent to child; a node may have
/// several parents and the parent links may form cycles.
#[derive(Debug, Clone)]
pub struct Scene {
    graph: DiGraph<SceneNode, ()>,
    root: NodeIndex,
    names: HashMap<String, NodeIndex>,
    contact_manager: Option<ContactList>,
}

fn index(context: ContextId) -> NodeIndex {
    NodeIndex::new(context.index())
}

fn context(index: NodeIndex) -> ContextId {
    ContextId::from(index.index())
}

impl Scene {
    /// A scene with only a root node that cannot sleep.
    pub fn new(root_name: &str, dt: f64) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(SceneNode::new(root_name, dt));
        let mut names = HashMap::new();
        names.insert(root_name.to_string(), root);
        Self {
            graph,
            root,
            names,
            contact_manager: None,
        }
    }

    pub fn add_node(&mut self, node: SceneNode, parents: &[ContextId]) -> Result<ContextId> {
        if self.names.contains_key(&node.name) {
            return Err(SceneError::DuplicateNode(node.name));
        }
        if let Some(missing) = parents.iter().find(|p| self.node(**p).is_none()) {
            return Err(SceneError::unknown(missing.to_string(), node.name));
        }

        let name = node.name.clone();
        let idx = self.graph.add_node(node);
        self.names.insert(name, idx);
        for &parent in parents {
            self.graph.update_edge(index(parent), idx, ());
        }
        Ok(context(idx))
    }

    /// Adds a sleep-eligible node carrying `state` under `parent`.
    pub fn add_body(
        &mut self,
        name: &str,
        parent: ContextId,
        state: Velocities,
    ) -> Result<ContextId> {
        let mut node = SceneNode::new(name, self.graph[self.root].dt);
        node.can_change_sleeping_state = true;
        node.state = Some(state);
        self.add_node(node, &[parent])
    }

    /// Links `child` under one more parent. Cycles are allowed.
    pub fn add_parent(&mut self, child: ContextId, parent: ContextId) -> Result<()> {
        for id in [child, parent] {
            if self.node(id).is_none() {
                return Err(SceneError::unknown(id.to_string(), "add_parent"));
            }
        }
        self.graph.update_edge(index(parent), index(child), ());
        Ok(())
    }

    #[must_use]
    pub fn node(&self, id: ContextId) -> Option<&SceneNode> {
        self.graph.node_weight(index(id))
    }

    pub fn node_mut(&mut self, id: ContextId) -> Option<&mut SceneNode> {
        self.graph.node_weight_mut(index(id))
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<ContextId> {
        self.names.get(name).copied().map(context)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Installs (or removes) the scene-wide contact manager.
    pub fn set_contact_manager(&mut self, manager: Option<ContactList>) {
        self.contact_manager = manager;
    }

    /// A contact between the collision models of `a` and `b`, using each
    /// node's moving flag.
    pub fn touch(&self, a: ContextId, b: ContextId) -> Result<Contact> {
        let side = |id: ContextId| {
            self.node(id)
                .map(|n| CollisionModelRef::new(id, n.moving))
                .ok_or_else(|| SceneError::unknown(id.to_string(), "contact"))
        };
        Ok(Contact::new(side(a)?, side(b)?))
    }

    /// Records a contact: in the contact manager when the scene has one,
    /// otherwise on the node of its first model.
    pub fn add_contact(&mut self, contact: Contact) -> Result<()> {
        if let Some(manager) = self.contact_manager.as_mut() {
            manager.contacts.push(contact);
            return Ok(());
        }
        let owner = contact.first.context;
        self.node_mut(owner)
            .ok_or_else(|| SceneError::unknown(owner.to_string(), "contact"))?
            .contacts
            .push(contact);
        Ok(())
    }

    pub fn clear_contacts(&mut self) {
        if let Some(manager) = self.contact_manager.as_mut() {
            manager.contacts.clear();
        }
        for node in self.graph.node_weights_mut() {
            node.contacts.clear();
        }
    }

    /// Stand-in integrator: scales the velocities of every awake node.
    pub fn damp_awake(&mut self, factor: f64) {
        for node in self.graph.node_weights_mut() {
            if node.sleeping {
                continue;
            }
            if let Some(state) = node.state.as_mut() {
                state.scale(factor);
            }
        }
    }

    /// Built-in scene used when no scene file is given: a box resting on a
    /// static floor with a ball rolling against it.
    pub fn demo(dt: f64) -> Result<Self> {
        let mut scene = Scene::new("root", dt);
        let root = scene.root();
        scene.set_contact_manager(Some(ContactList::default()));

        let mut floor = SceneNode::new("floor", dt);
        floor.moving = false;
        let floor = scene.add_node(floor, &[root])?;
        let crate_box = scene.add_body("box", root, Velocities::Vec3(vec![[0.0; 3]; 8]))?;
        let ball = scene.add_body(
            "ball",
            root,
            Velocities::Rigid3(vec![Rigid3Deriv {
                linear: [0.2, 0.0, 0.0],
                angular: [0.0, 0.0, -0.4],
            }]),
        )?;

        for (a, b) in [(crate_box, floor), (ball, floor), (ball, crate_box)] {
            let contact = scene.touch(a, b)?;
            scene.add_contact(contact)?;
        }
        Ok(scene)
    }

    /// Names and sleeping flags of every node, in insertion order.
    pub fn sleep_states(&self) -> impl Iterator<Item = (&str, bool)> {
        self.graph
            .node_weights()
            .map(|n| (n.name.as_str(), n.sleeping))
    }
}

impl SceneGraph for Scene {
    fn root(&self) -> ContextId {
        context(self.root)
    }

    fn collect_sleep_eligible_groups(&self, root: ContextId) -> Vec<ContextId> {
        let mut groups = Vec::new();
        if self.node(root).is_none() {
            return groups;
        }
        let mut visit = DfsPostOrder::new(&self.graph, index(root));
        while let Some(idx) = visit.next(&self.graph) {
            let node = &self.graph[idx];
            if node.can_change_sleeping_state && node.state.is_some() {
                groups.push(context(idx));
            }
        }
        groups
    }

    fn name(&self, context: ContextId) -> &str {
        self.node(context).map_or("<removed>", |n| n.name.as_str())
    }

    fn velocities(&self, context: ContextId) -> Option<&Velocities> {
        self.node(context)?.state.as_ref()
    }

    fn is_sleeping(&self, context: ContextId) -> bool {
        self.node(context).is_some_and(|n| n.sleeping)
    }

    fn set_sleeping(&mut self, context: ContextId, sleeping: bool) {
        if let Some(node) = self.node_mut(context) {
            node.sleeping = sleeping;
        }
    }

    fn can_change_sleeping_state(&self, context: ContextId) -> bool {
        self.node(context)
            .is_some_and(|n| n.can_change_sleeping_state)
    }

    fn parents(&self, ctx: ContextId) -> Vec<ContextId> {
        if self.node(ctx).is_none() {
            return Vec::new();
        }
        self.graph
            .neighbors_directed(index(ctx), Direction::Incoming)
            .map(context)
            .collect()
    }

    fn dt(&self, context: ContextId) -> f64 {
        self.node(context).map_or(0.0, |n| n.dt)
    }

    fn contact_manager(&self) -> Option<&dyn ContactManager> {
        self.contact_manager
            .as_ref()
            .map(|m| m as &dyn ContactManager)
    }

    fn search_contacts(&self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let mut visit = Dfs::new(&self.graph, self.root);
        while let Some(idx) = visit.next(&self.graph) {
            contacts.extend_from_slice(&self.graph[idx].contacts);
        }
        contacts
    }
}
