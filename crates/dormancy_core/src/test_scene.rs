//! Minimal vector-backed scene used by unit tests.

use crate::host::{ContactManager, SceneGraph};
use dormancy_data::{Contact, ContextId, Velocities};
use std::collections::HashSet;

impl ContactManager for Vec<Contact> {
    fn contacts(&self) -> Vec<Contact> {
        self.clone()
    }
}

pub struct TestNode {
    pub name: String,
    pub can_sleep: bool,
    pub sleeping: bool,
    pub dt: f64,
    pub state: Option<Velocities>,
    pub parents: Vec<ContextId>,
}

pub struct TestScene {
    pub nodes: Vec<TestNode>,
    pub managed_contacts: Option<Vec<Contact>>,
    pub searchable_contacts: Vec<Contact>,
}

impl TestScene {
    /// A scene holding only a root node that cannot sleep.
    pub fn new() -> Self {
        Self {
            nodes: vec![TestNode {
                name: "root".to_string(),
                can_sleep: false,
                sleeping: false,
                dt: 0.01,
                state: None,
                parents: Vec::new(),
            }],
            managed_contacts: None,
            searchable_contacts: Vec::new(),
        }
    }

    pub fn add_node(&mut self, name: &str, parents: &[ContextId]) -> ContextId {
        let id = ContextId::from(self.nodes.len());
        self.nodes.push(TestNode {
            name: name.to_string(),
            can_sleep: false,
            sleeping: false,
            dt: 0.01,
            state: None,
            parents: parents.to_vec(),
        });
        id
    }

    /// A sleep-eligible child of the root carrying `state`.
    pub fn add_group(&mut self, name: &str, state: Velocities) -> ContextId {
        let id = self.add_node(name, &[ContextId(0)]);
        let node = &mut self.nodes[id.index()];
        node.can_sleep = true;
        node.state = Some(state);
        id
    }

    pub fn node_mut(&mut self, id: ContextId) -> &mut TestNode {
        &mut self.nodes[id.index()]
    }

    fn children(&self, id: ContextId) -> impl Iterator<Item = ContextId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.parents.contains(&id))
            .map(|(i, _)| ContextId::from(i))
    }

    fn visit_bottom_up(&self, id: ContextId, seen: &mut HashSet<ContextId>, out: &mut Vec<ContextId>) {
        if !seen.insert(id) {
            return;
        }
        let children: Vec<_> = self.children(id).collect();
        for child in children {
            self.visit_bottom_up(child, seen, out);
        }
        let node = &self.nodes[id.index()];
        if node.can_sleep && node.state.is_some() {
            out.push(id);
        }
    }
}

impl SceneGraph for TestScene {
    fn root(&self) -> ContextId {
        ContextId(0)
    }

    fn collect_sleep_eligible_groups(&self, root: ContextId) -> Vec<ContextId> {
        let mut out = Vec::new();
        self.visit_bottom_up(root, &mut HashSet::new(), &mut out);
        out
    }

    fn name(&self, context: ContextId) -> &str {
        self.nodes
            .get(context.index())
            .map_or("<missing>", |n| n.name.as_str())
    }

    fn velocities(&self, context: ContextId) -> Option<&Velocities> {
        self.nodes.get(context.index())?.state.as_ref()
    }

    fn is_sleeping(&self, context: ContextId) -> bool {
        self.nodes.get(context.index()).is_some_and(|n| n.sleeping)
    }

    fn set_sleeping(&mut self, context: ContextId, sleeping: bool) {
        if let Some(node) = self.nodes.get_mut(context.index()) {
            node.sleeping = sleeping;
        }
    }

    fn can_change_sleeping_state(&self, context: ContextId) -> bool {
        self.nodes.get(context.index()).is_some_and(|n| n.can_sleep)
    }

    fn parents(&self, context: ContextId) -> Vec<ContextId> {
        self.nodes
            .get(context.index())
            .map(|n| n.parents.clone())
            .unwrap_or_default()
    }

    fn dt(&self, context: ContextId) -> f64 {
        self.nodes.get(context.index()).map_or(0.0, |n| n.dt)
    }

    fn contact_manager(&self) -> Option<&dyn ContactManager> {
        self.managed_contacts
            .as_ref()
            .map(|c| c as &dyn ContactManager)
    }

    fn search_contacts(&self) -> Vec<Contact> {
        self.searchable_contacts.clone()
    }
}
