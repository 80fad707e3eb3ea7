use super::DisciplineInstance;
use ahash::{HashSet, HashSetExt};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A conflict between two instances described by their indices.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Serialize, PartialEq)]
pub struct Conflict(usize, usize);

impl Conflict {
    /// Creates a new conflict between two instances.
    #[must_use]
    pub const fn new(first: usize, second: usize) -> Self {
        Self(first, second)
    }
}

/// A conflict graph. Contains an edge for every pair of instances that may not share a cell.
/// Undirected and without self-loops.
#[derive(Clone, Debug, Deserialize, Eq, Serialize, PartialEq)]
#[serde(from = "Vec<Conflict>", into = "Vec<Conflict>")]
pub struct ConflictGraph {
    edges: Vec<HashSet<usize>>,
}

impl ConflictGraph {
    /// Builds the graph of the given instances.
    /// Two instances conflict when they belong to the same cohort or share an instructor.
    /// Shift eligibility is not an edge, it only restricts which cells are legal.
    #[must_use]
    pub fn build(instances: &[DisciplineInstance]) -> Self {
        let mut edges = vec![HashSet::new(); instances.len()];

        for (i, first) in instances.iter().enumerate() {
            for (j, second) in instances.iter().enumerate().skip(i + 1) {
                if first.cohort == second.cohort || first.shares_instructor(second) {
                    edges[i].insert(j);
                    edges[j].insert(i);
                }
            }
        }

        Self { edges }
    }

    /// Returns whether the given instances conflict.
    #[must_use]
    pub fn are_conflicted(&self, first: usize, second: usize) -> bool {
        self.edges
            .get(first)
            .is_some_and(|conflicts| conflicts.contains(&second))
    }

    /// Returns the conflicts of the given instance.
    #[must_use]
    pub fn conflicts(&self, instance: usize) -> &HashSet<usize> {
        static EMPTY: LazyLock<HashSet<usize>> = LazyLock::new(HashSet::new);

        self.edges.get(instance).unwrap_or(&EMPTY)
    }

    /// Returns the number of conflicts of the given instance.
    #[must_use]
    pub fn degree(&self, instance: usize) -> usize {
        self.conflicts(instance).len()
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(HashSet::len).sum::<usize>() / 2
    }
}

impl From<Vec<Conflict>> for ConflictGraph {
    fn from(conflicts: Vec<Conflict>) -> Self {
        let mut edges = Vec::new();

        for conflict in conflicts {
            while edges.len() <= conflict.0.max(conflict.1) {
                edges.push(HashSet::new());
            }

            if conflict.0 != conflict.1 {
                edges[conflict.0].insert(conflict.1);
                edges[conflict.1].insert(conflict.0);
            }
        }

        Self { edges }
    }
}

impl From<ConflictGraph> for Vec<Conflict> {
    fn from(conflicts: ConflictGraph) -> Self {
        let mut result = Self::new();

        for (from_vertex, adjacent_vertices) in conflicts.edges.into_iter().enumerate() {
            for to_vertex in adjacent_vertices {
                if to_vertex > from_vertex {
                    result.push(Conflict(from_vertex, to_vertex));
                }
            }
        }

        result.sort_unstable_by_key(|conflict| (conflict.0, conflict.1));
        result
    }
}
