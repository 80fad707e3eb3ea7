//! Hard-constraint checks of a finished timetable.
//!
//! Every check reports typed [`Violation`]s instead of a boolean so the
//! orchestrator can name the disciplines and instructors behind a rejected
//! attempt. Checks:
//! - no instructor teaches two instances in one cell
//! - no cohort attends two instances in one cell
//! - night programs only use night blocks and day programs never do
//! - every instance sits in a cell holding its own color
//! - (optional) no instructor exceeds the daily hour cap

use super::{Block, CohortKey, Day, DisciplineInstance, InstructorId, Slot, Timetable};
use ahash::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// A broken constraint.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Violation {
    /// One instructor teaches several instances in the same cell.
    InstructorOverlap {
        day: Day,
        block: Block,
        instructor: InstructorId,
        instances: Vec<usize>,
    },
    /// One cohort attends several instances in the same cell.
    CohortOverlap {
        day: Day,
        block: Block,
        cohort: CohortKey,
        instances: Vec<usize>,
    },
    /// The instance sits in a block of the other shift.
    ShiftMismatch { instance: usize, block: Block },
    /// The instance has no cell, or its cell holds another color.
    Unassigned { instance: usize },
    /// The instructor teaches more hours in one day than allowed.
    InstructorOverload {
        instructor: InstructorId,
        day: Day,
        hours: u32,
    },
}

impl Violation {
    /// Renders the violation with discipline codes and names instead of indices.
    #[must_use]
    pub fn describe(&self, instances: &[DisciplineInstance]) -> String {
        let names = |indices: &[usize]| {
            indices
                .iter()
                .filter_map(|&index| instances.get(index))
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        match self {
            Self::InstructorOverlap { day, block, instructor, instances } => {
                format!("Prof {instructor} double-booked on {day} {block}: {}", names(instances.as_slice()))
            }
            Self::CohortOverlap { day, block, cohort, instances } => {
                format!("cohort {cohort} double-booked on {day} {block}: {}", names(instances.as_slice()))
            }
            Self::ShiftMismatch { instance, block } => {
                format!("{} placed in {block} outside its shift", names(std::slice::from_ref(instance)))
            }
            Self::Unassigned { instance } => format!("{} has no cell", names(std::slice::from_ref(instance))),
            Self::InstructorOverload { .. } => self.to_string(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InstructorOverlap { day, block, instructor, instances } => {
                write!(f, "Prof {instructor} overlaps on {day} {block}: {instances:?}")
            }
            Self::CohortOverlap { day, block, cohort, instances } => {
                write!(f, "cohort {cohort} overlaps on {day} {block}: {instances:?}")
            }
            Self::ShiftMismatch { instance, block } => {
                write!(f, "instance {instance} outside its shift in {block}")
            }
            Self::Unassigned { instance } => write!(f, "instance {instance} is unassigned"),
            Self::InstructorOverload { instructor, day, hours } => {
                write!(f, "Prof {instructor} teaches {hours}h on {day}")
            }
        }
    }
}

/// Hours taught per instructor and day.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoadTable {
    hours: HashMap<(InstructorId, Day), u32>,
}

impl LoadTable {
    /// Sums the hours of every slotted instance per instructor and day.
    #[must_use]
    pub fn compute(instances: &[DisciplineInstance]) -> Self {
        let mut hours = HashMap::default();

        for instance in instances {
            if let Some(slot) = instance.slot {
                for &instructor in &instance.instructors {
                    *hours.entry((instructor, slot.day)).or_default() += instance.hours;
                }
            }
        }

        Self { hours }
    }

    /// Returns the hours the instructor teaches on the day.
    #[must_use]
    pub fn hours(&self, instructor: InstructorId, day: Day) -> u32 {
        self.hours.get(&(instructor, day)).copied().unwrap_or_default()
    }

    /// Iterates over every (instructor, day, hours) entry, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (InstructorId, Day, u32)> + '_ {
        self.hours
            .iter()
            .map(|(&(instructor, day), &hours)| (instructor, day, hours))
    }

    /// Lists the instructors whose daily hours exceed the cap, sorted.
    #[must_use]
    pub fn overloads(&self, cap: u32) -> Vec<Violation> {
        let mut violations: Vec<_> = self
            .iter()
            .filter(|&(_, _, hours)| hours > cap)
            .map(|(instructor, day, hours)| Violation::InstructorOverload { instructor, day, hours })
            .collect();
        violations.sort_unstable();
        violations
    }
}

/// Checks instructor overlap, cohort overlap, shift eligibility and completeness.
/// The result is sorted and empty when the timetable is acceptable.
#[must_use]
pub fn validate(timetable: &Timetable, instances: &[DisciplineInstance]) -> Vec<Violation> {
    let mut violations: Vec<_> = instances
        .iter()
        .filter(|instance| {
            !matches!((instance.slot, instance.color), (Some(slot), Some(color)) if timetable.get(slot) == Some(color))
        })
        .map(|instance| Violation::Unassigned { instance: instance.index })
        .collect();

    for (day, block, color) in timetable.cells() {
        let slot = Slot::new(day, block);
        let members: Vec<_> = instances
            .iter()
            .filter(|instance| instance.slot == Some(slot) && instance.color == Some(color))
            .collect();

        violations.extend(instructor_overlaps(slot, &members));
        violations.extend(cohort_overlaps(slot, &members));
    }

    violations.extend(shift_mismatches(instances));
    violations.sort_unstable();
    violations
}

/// Runs [`validate`] and adds the daily overloads above `cap`.
#[must_use]
pub fn validate_with_load(
    timetable: &Timetable,
    instances: &[DisciplineInstance],
    cap: u32,
) -> Vec<Violation> {
    let mut violations = validate(timetable, instances);
    violations.extend(LoadTable::compute(instances).overloads(cap));
    violations.sort_unstable();
    violations
}

fn instructor_overlaps(slot: Slot, members: &[&DisciplineInstance]) -> Vec<Violation> {
    let mut by_instructor: BTreeMap<InstructorId, Vec<usize>> = BTreeMap::new();
    for instance in members {
        for &instructor in &instance.instructors {
            by_instructor.entry(instructor).or_default().push(instance.index);
        }
    }

    by_instructor
        .into_iter()
        .filter(|(_, indices)| indices.len() > 1)
        .map(|(instructor, instances)| Violation::InstructorOverlap {
            day: slot.day,
            block: slot.block,
            instructor,
            instances,
        })
        .collect()
}

fn cohort_overlaps(slot: Slot, members: &[&DisciplineInstance]) -> Vec<Violation> {
    let mut by_cohort: BTreeMap<&CohortKey, Vec<usize>> = BTreeMap::new();
    for instance in members {
        by_cohort.entry(&instance.cohort).or_default().push(instance.index);
    }

    by_cohort
        .into_iter()
        .filter(|(_, indices)| indices.len() > 1)
        .map(|(cohort, instances)| Violation::CohortOverlap {
            day: slot.day,
            block: slot.block,
            cohort: cohort.clone(),
            instances,
        })
        .collect()
}

fn shift_mismatches(instances: &[DisciplineInstance]) -> impl Iterator<Item = Violation> + '_ {
    instances.iter().filter_map(|instance| {
        let slot = instance.slot?;
        (slot.block.shift() != instance.shift).then_some(Violation::ShiftMismatch {
            instance: instance.index,
            block: slot.block,
        })
    })
}
