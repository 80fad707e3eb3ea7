use crate::core::{Colorer, ConflictGraph};
use ahash::HashSet;

/// Colors vertices in input order with the smallest color unused by their colored neighbors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl Colorer for Greedy {
    fn color(&mut self, graph: &ConflictGraph) -> Vec<usize> {
        let mut coloring: Vec<Option<usize>> = vec![None; graph.len()];

        for vertex in 0..graph.len() {
            let conflicts = graph.conflicts(vertex).iter();
            let blocked: HashSet<_> = conflicts.filter_map(|&other| coloring[other]).collect();
            coloring[vertex] = Some(super::smallest_free(&blocked));
        }

        coloring.into_iter().flatten().collect()
    }

    fn name(&self) -> &'static str {
        "Greedy"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::COLORERS)]
static INSTANCE: fn() -> Box<dyn Colorer> = || Box::new(Greedy);

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{colors_used, is_proper, Conflict};
    use crate::data::samples;

    #[test]
    fn test_greedy() {
        assert!(samples(INSTANCE).is_ok());
    }

    #[test]
    fn path_should_alternate_two_colors() {
        let graph = ConflictGraph::from(vec![
            Conflict::new(0, 1),
            Conflict::new(1, 2),
            Conflict::new(2, 3),
        ]);

        assert_eq!(Greedy.color(&graph), vec![0, 1, 0, 1]);
    }

    #[test]
    fn isolated_vertices_should_share_color_zero() {
        let graph = ConflictGraph::from(vec![Conflict::new(3, 3)]);

        assert_eq!(Greedy.color(&graph), vec![0; 4]);
    }

    #[test]
    fn input_order_should_drive_the_result() {
        // Crown graph: a_i and b_j conflict when i != j, listed a0 b0 a1 b1 ...
        let k = 4;
        let mut conflicts = Vec::new();
        for i in 0..k {
            for j in 0..k {
                if i != j {
                    conflicts.push(Conflict::new(2 * i, 2 * j + 1));
                }
            }
        }
        let graph = ConflictGraph::from(conflicts);
        let coloring = Greedy.color(&graph);

        assert!(is_proper(&graph, &coloring));
        assert_eq!(colors_used(&coloring), k);
    }
}
