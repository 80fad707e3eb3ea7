use super::{Block, Day, DisciplineInstance, LoadTable, Timetable};

/// An accepted timetable together with the instances it places.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule {
    instances: Vec<DisciplineInstance>,
    timetable: Timetable,
    attempts: usize,
}

impl Schedule {
    /// Wraps the result of a successful attempt. `attempts` counts the attempts used, starting at 1.
    #[must_use]
    pub const fn new(instances: Vec<DisciplineInstance>, timetable: Timetable, attempts: usize) -> Self {
        Self {
            instances,
            timetable,
            attempts,
        }
    }

    /// Returns the placed instances, indexed by their `index`.
    #[must_use]
    pub fn instances(&self) -> &[DisciplineInstance] {
        &self.instances
    }

    /// Returns the weekly grid of colors.
    #[must_use]
    pub const fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Returns the number of attempts it took to accept the timetable.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Iterates over every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (Day, Block, usize)> + '_ {
        self.timetable.cells()
    }

    /// Returns every instance holding the color.
    #[must_use]
    pub fn color_to_instances(&self, color: usize) -> Vec<&DisciplineInstance> {
        self.instances
            .iter()
            .filter(|instance| instance.color == Some(color))
            .collect()
    }

    /// Returns the instances placed in the given cell.
    #[must_use]
    pub fn cell_instances(&self, day: Day, block: Block) -> Vec<&DisciplineInstance> {
        self.instances
            .iter()
            .filter(|instance| instance.slot.is_some_and(|slot| slot.day == day && slot.block == block))
            .collect()
    }

    /// Counts the distinct colors of the final coloring.
    #[must_use]
    pub fn colors_used(&self) -> usize {
        let colors: Vec<_> = self.instances.iter().filter_map(|instance| instance.color).collect();
        super::colors_used(&colors)
    }

    /// Computes the daily teaching load of every instructor.
    #[must_use]
    pub fn load(&self) -> LoadTable {
        LoadTable::compute(&self.instances)
    }
}
