mod config;
mod error;
#[cfg(test)]
pub(crate) mod fixtures;
mod graph;
mod problem;
mod schedule;
mod timetable;
mod validation;

pub use config::*;
pub use error::*;
pub use graph::*;
pub use problem::*;
pub use schedule::*;
pub use timetable::*;
pub use validation::*;

use ahash::HashSet;

/// Colors the vertices of a conflict graph.
pub trait Colorer {
    /// Returns one color per vertex such that adjacent vertices never share a color.
    fn color(&mut self, graph: &ConflictGraph) -> Vec<usize>;

    /// Returns the name of the colorer.
    fn name(&self) -> &'static str;
}

/// Counts the distinct colors of a coloring.
#[must_use]
pub fn colors_used(coloring: &[usize]) -> usize {
    coloring.iter().collect::<HashSet<_>>().len()
}

/// Returns whether no edge of the graph joins two vertices of the same color.
#[must_use]
pub fn is_proper(graph: &ConflictGraph, coloring: &[usize]) -> bool {
    coloring.len() == graph.len()
        && (0..graph.len()).all(|vertex| {
            graph
                .conflicts(vertex)
                .iter()
                .all(|&other| coloring[vertex] != coloring[other])
        })
}
