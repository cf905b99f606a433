//! Wake propagation through the contact graph.
//!
//! After collision detection, contacts between moving models link the
//! sleep-eligible groups they belong to. Any sleeping group linked to an
//! awake one is woken, and the scan repeats until nothing changes, so waking
//! travels through chains of sleeping groups.

use crate::config::SleepConfig;
use crate::host::{gather_contacts, SceneGraph};
use crate::registry::SleepableRegistry;
use dormancy_data::{Contact, ContextId};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, HashSet, VecDeque};

/// Closest context, starting with `context` itself and walking up parent
/// links breadth-first, that is allowed to change its sleeping state.
///
/// Returns `context` unchanged when no such ancestor exists. Each context is
/// visited at most once, so cyclic parent links terminate.
pub fn parent_context_that_can_sleep<S: SceneGraph + ?Sized>(
    scene: &S,
    context: ContextId,
) -> ContextId {
    let mut queue = VecDeque::from([context]);
    let mut visited = HashSet::new();

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        if scene.can_change_sleeping_state(current) {
            return current;
        }
        queue.extend(
            scene
                .parents(current)
                .into_iter()
                .filter(|p| !visited.contains(p)),
        );
    }

    context
}

/// Undirected adjacency between contexts touching through moving contacts.
///
/// Node `i` for `i < registry.len()` is the `i`-th tracked group. Contexts
/// that are not tracked but touch a tracked group get nodes after those, so a
/// moving body that never sleeps still wakes what it hits.
#[derive(Debug, Clone)]
pub struct ContactGraph {
    graph: UnGraph<ContextId, ()>,
    tracked: usize,
}

impl ContactGraph {
    pub fn build<S: SceneGraph + ?Sized>(
        registry: &SleepableRegistry,
        scene: &S,
        contacts: &[Contact],
    ) -> Self {
        let mut graph = UnGraph::with_capacity(registry.len(), contacts.len());
        for group in registry.groups() {
            graph.add_node(group.context);
        }
        let mut untracked: HashMap<ContextId, NodeIndex> = HashMap::new();

        for contact in contacts {
            // Static geometry never wakes anything.
            if !contact.is_between_moving_models() {
                continue;
            }

            let (first, second) = contact.collision_models();
            let a = parent_context_that_can_sleep(scene, first.context);
            let b = parent_context_that_can_sleep(scene, second.context);
            if a == b {
                continue;
            }

            let (ia, ib) = match (registry.index_of(a), registry.index_of(b)) {
                (None, None) => continue,
                (Some(ia), Some(ib)) => (NodeIndex::new(ia), NodeIndex::new(ib)),
                (Some(ia), None) => (
                    NodeIndex::new(ia),
                    *untracked.entry(b).or_insert_with(|| graph.add_node(b)),
                ),
                (None, Some(ib)) => (
                    *untracked.entry(a).or_insert_with(|| graph.add_node(a)),
                    NodeIndex::new(ib),
                ),
            };
            graph.update_edge(ia, ib, ());
        }

        Self {
            graph,
            tracked: registry.len(),
        }
    }

    /// Contexts adjacent to the `index`-th tracked group.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = ContextId> + '_ {
        self.graph
            .neighbors(NodeIndex::new(index))
            .map(|n| self.graph[n])
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of untracked contexts pulled in by contacts.
    #[must_use]
    pub fn untracked_count(&self) -> usize {
        self.graph.node_count() - self.tracked
    }

    #[must_use]
    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .is_some()
    }
}

/// Wakes every sleeping tracked group connected to an awake context, directly
/// or through other sleeping groups. Returns the groups woken, in wake order.
pub fn wake_up_groups<S: SceneGraph + ?Sized>(
    registry: &SleepableRegistry,
    scene: &mut S,
    graph: &ContactGraph,
    verbose: bool,
) -> Vec<ContextId> {
    let mut woken = Vec::new();

    loop {
        let mut changed = false;
        for (index, group) in registry.groups().iter().enumerate() {
            if !scene.is_sleeping(group.context) {
                continue;
            }
            let touches_awake = graph.neighbors(index).any(|n| !scene.is_sleeping(n));
            if !touches_awake {
                continue;
            }

            scene.set_sleeping(group.context, false);
            woken.push(group.context);
            changed = true;

            if verbose {
                tracing::info!("Wake up node {}", scene.name(group.context));
            } else {
                tracing::debug!(context = %group.context, "Wake up node {}", scene.name(group.context));
            }
        }

        if !changed {
            break;
        }
    }

    woken
}

/// Collision-end stage: gathers this step's contacts and propagates wakes.
pub fn propagate_wake<S: SceneGraph + ?Sized>(
    registry: &SleepableRegistry,
    scene: &mut S,
    config: &SleepConfig,
) -> Vec<ContextId> {
    let contacts = gather_contacts(&*scene);
    let graph = ContactGraph::build(registry, &*scene, &contacts);
    tracing::trace!(
        contacts = contacts.len(),
        edges = graph.edge_count(),
        "Built contact graph"
    );
    wake_up_groups(registry, scene, &graph, config.verbose)
}
