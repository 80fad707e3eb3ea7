use crate::core::{Colorer, ConflictGraph};
use ahash::{HashSet, HashSetExt};

/// Degree of saturation coloring (Brélaz, 1979).
///
/// Repeatedly colors the uncolored vertex seeing the most distinct colors among its
/// neighbors. Ties go to the larger degree, then to the lower index, so the result
/// only depends on the graph.
#[derive(Clone, Copy, Debug, Default)]
pub struct DSatur;

impl Colorer for DSatur {
    fn color(&mut self, graph: &ConflictGraph) -> Vec<usize> {
        let vertices = graph.len();
        let mut coloring: Vec<Option<usize>> = vec![None; vertices];
        let mut neighbor_colors: Vec<HashSet<usize>> = vec![HashSet::new(); vertices];

        for _ in 0..vertices {
            let next = (0..vertices).filter(|&v| coloring[v].is_none()).max_by(|&a, &b| {
                let saturation = neighbor_colors[a].len().cmp(&neighbor_colors[b].len());
                saturation
                    .then_with(|| graph.degree(a).cmp(&graph.degree(b)))
                    .then_with(|| b.cmp(&a))
            });

            let Some(vertex) = next else {
                unreachable!("Every iteration colors exactly one vertex");
            };

            let color = super::smallest_free(&neighbor_colors[vertex]);
            coloring[vertex] = Some(color);

            for &other in graph.conflicts(vertex) {
                if coloring[other].is_none() {
                    neighbor_colors[other].insert(color);
                }
            }
        }

        coloring.into_iter().flatten().collect()
    }

    fn name(&self) -> &'static str {
        "DSatur"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::COLORERS)]
static INSTANCE: fn() -> Box<dyn Colorer> = || Box::new(DSatur);
