use crate::core::Colorer;
use ahash::HashSet;

mod dsatur;
mod greedy;
mod orchestrator;
mod slots;

pub use dsatur::DSatur;
pub use greedy::Greedy;
pub use orchestrator::Orchestrator;
pub use slots::{assign, eligible_blocks};

/// Constructors of every available colorer.
#[allow(unsafe_code)]
#[linkme::distributed_slice]
pub static COLORERS: [fn() -> Box<dyn Colorer>];

/// Creates the registered colorer with the given name, ignoring case.
#[must_use]
pub fn colorer(name: &str) -> Option<Box<dyn Colorer>> {
    COLORERS
        .iter()
        .map(|init| init())
        .find(|colorer| colorer.name().eq_ignore_ascii_case(name))
}

/// Smallest non-negative color absent from `blocked`.
fn smallest_free(blocked: &HashSet<usize>) -> usize {
    (0..=blocked.len())
        .find(|color| !blocked.contains(color))
        .unwrap_or_else(|| unreachable!("{} colors cannot block {} values", blocked.len(), blocked.len() + 1))
}
