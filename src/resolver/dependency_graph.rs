//! Whole-store reference graph and validation.
//!
//! [`Resolver`](super::Resolver) answers questions about one root and stops at
//! the first problem it meets. Configuration tooling usually wants the
//! opposite: every problem in the store, reported at once. This module builds
//! the full reference graph of an [`EntityStore`] and reports
//!
//! - every dangling reference (referrer plus missing key), and
//! - every cycle, found as a strongly connected component.
//!
//! Each cycle is reported as a closed path that starts at the smallest key of
//! its component and follows references in declaration order.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::core::{Entity, EntityKey, ResolveError, format_path};
use crate::store::EntityStore;

/// A reference to an entity that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// The entity declaring the reference.
    pub referrer: EntityKey,
    /// The key that is not in the store.
    pub missing: EntityKey,
    /// Similar existing names of the missing key's kind.
    pub suggestions: Vec<String>,
}

/// The reference graph of a whole store.
pub struct DependencyGraph<'a> {
    store: &'a EntityStore,
    graph: DiGraph<&'a EntityKey, ()>,
    node_map: HashMap<&'a EntityKey, NodeIndex>,
    dangling: Vec<DanglingReference>,
}

impl<'a> DependencyGraph<'a> {
    /// Build the graph: one node per entity, one edge per distinct reference.
    #[must_use]
    pub fn build(store: &'a EntityStore) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for entity in store.iter() {
            let index = graph.add_node(entity.key());
            node_map.insert(entity.key(), index);
        }

        let mut dangling = Vec::new();
        for entity in store.iter() {
            let from = node_map[entity.key()];
            for reference in entity.references() {
                match node_map.get(reference) {
                    Some(&to) => {
                        if !graph.contains_edge(from, to) {
                            graph.add_edge(from, to, ());
                        }
                    }
                    None => {
                        let record = DanglingReference {
                            referrer: entity.key().clone(),
                            missing: reference.clone(),
                            suggestions: store.similar_names(reference),
                        };
                        if !dangling.contains(&record) {
                            dangling.push(record);
                        }
                    }
                }
            }
        }

        Self {
            store,
            graph,
            node_map,
            dangling,
        }
    }

    /// Number of entities in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct resolvable references.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// References to missing entities, in referrer key order.
    #[must_use]
    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }

    /// Every cycle in the store, one closed path per strongly connected
    /// component, sorted by starting key.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<EntityKey>> {
        let mut cycles: Vec<Vec<EntityKey>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || self.graph.contains_edge(component[0], component[0])
            })
            .filter_map(|component| {
                let members: HashSet<&EntityKey> =
                    component.iter().map(|&index| self.graph[index]).collect();
                let start = members.iter().min().copied()?;
                Some(self.cycle_witness(start, &members))
            })
            .collect();

        cycles.sort();
        cycles
    }

    /// Whether `key` sits on any cycle.
    #[must_use]
    pub fn is_cyclic(&self, key: &EntityKey) -> bool {
        let Some(&index) = self.node_map.get(key) else {
            return false;
        };
        tarjan_scc(&self.graph).into_iter().any(|component| {
            component.contains(&index)
                && (component.len() > 1 || self.graph.contains_edge(index, index))
        })
    }

    /// Find a closed path from `start` back to itself inside one component.
    fn cycle_witness(&self, start: &'a EntityKey, members: &HashSet<&'a EntityKey>) -> Vec<EntityKey> {
        let mut path: Vec<(&'a EntityKey, usize)> = vec![(start, 0)];
        let mut visited: HashSet<&'a EntityKey> = HashSet::from([start]);

        while let Some((key, next)) = path.last_mut() {
            let references = self.store.get(*key).map(Entity::references).unwrap_or_default();
            let Some(reference) = references.get(*next) else {
                path.pop();
                continue;
            };
            *next += 1;

            if reference == start {
                let mut cycle: Vec<EntityKey> = path.iter().map(|(k, _)| (*k).clone()).collect();
                cycle.push(start.clone());
                return cycle;
            }
            if let Some(&member) = members.get(reference)
                && visited.insert(member)
            {
                path.push((member, 0));
            }
        }

        // Every strongly connected component contains a cycle through each member
        vec![start.clone()]
    }
}

/// Result of [`validate_store`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Dangling references.
    pub undefined: Vec<DanglingReference>,
    /// Cycles as closed paths.
    pub cycles: Vec<Vec<EntityKey>>,
}

impl ValidationReport {
    /// Whether the store has no problems.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.undefined.is_empty() && self.cycles.is_empty()
    }

    /// Total number of problems found.
    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.undefined.len() + self.cycles.len()
    }

    /// The problems as resolution errors, dangling references first.
    #[must_use]
    pub fn errors(&self) -> Vec<ResolveError> {
        self.undefined
            .iter()
            .map(|d| ResolveError::UndefinedReference {
                referrer: d.referrer.clone(),
                missing: d.missing.clone(),
                suggestions: d.suggestions.clone(),
            })
            .chain(self.cycles.iter().map(|path| ResolveError::Cycle {
                path: path.clone(),
            }))
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.undefined {
            writeln!(f, "undefined: {} references {}", d.referrer, d.missing)?;
        }
        for cycle in &self.cycles {
            writeln!(f, "cycle: {}", format_path(cycle))?;
        }
        Ok(())
    }
}

/// Check a whole store for dangling references and cycles.
///
/// Never stops early: every problem in the store is reported.
#[must_use]
pub fn validate_store(store: &EntityStore) -> ValidationReport {
    let graph = DependencyGraph::build(store);
    let report = ValidationReport {
        undefined: graph.dangling().to_vec(),
        cycles: graph.cycles(),
    };
    tracing::debug!(
        "Validated {} entities and {} references: {} problem(s)",
        graph.node_count(),
        graph.edge_count(),
        report.problem_count()
    );
    report
}
