use super::{Block, Day, ScheduleError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of an instructor. Matches the 1-based instructor column of the offering.
pub type InstructorId = u32;

/// Shift a program is taught in.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Shift {
    /// Morning and afternoon blocks.
    Day,
    /// Night blocks only.
    Night,
}

/// The group of students that attends every discipline of one period of a curriculum.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct CohortKey {
    pub course: String,
    pub curriculum: String,
    pub period: String,
}

impl Display for CohortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}.{}", self.course, self.curriculum, self.period)
    }
}

/// A week cell: one block on one day.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Slot {
    pub day: Day,
    pub block: Block,
}

impl Slot {
    #[must_use]
    pub const fn new(day: Day, block: Block) -> Self {
        Self { day, block }
    }
}

/// One row of the offering, before splitting into schedulable instances.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Row {
    pub course: String,
    pub curriculum: String,
    pub period: String,
    pub code: String,
    pub name: String,
    pub hours: u32,
    pub instructors: Vec<InstructorId>,
}

/// A schedulable piece of a discipline. Lives in an arena addressed by `index`.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DisciplineInstance {
    pub index: usize,
    pub cohort: CohortKey,
    pub shift: Shift,
    pub code: String,
    pub name: String,
    pub hours: u32,
    pub instructors: Vec<InstructorId>,
    pub color: Option<usize>,
    pub slot: Option<Slot>,
}

impl DisciplineInstance {
    /// Creates an uncolored, unslotted instance.
    /// Instructors are sorted and deduplicated.
    #[must_use]
    pub fn new(index: usize, row: &Row, hours: u32, shift: Shift) -> Self {
        let mut instructors = row.instructors.clone();
        instructors.sort_unstable();
        instructors.dedup();

        Self {
            index,
            cohort: CohortKey {
                course: row.course.clone(),
                curriculum: row.curriculum.clone(),
                period: row.period.clone(),
            },
            shift,
            code: row.code.clone(),
            name: row.name.clone(),
            hours,
            instructors,
            color: None,
            slot: None,
        }
    }

    /// Returns whether both instances share at least one instructor.
    #[must_use]
    pub fn shares_instructor(&self, other: &Self) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.instructors.len() && j < other.instructors.len() {
            match self.instructors[i].cmp(&other.instructors[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    /// Clears the per-attempt state.
    pub fn reset(&mut self) {
        self.color = None;
        self.slot = None;
    }
}

impl Display for DisciplineInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({}, {}h)", self.code, self.name, self.cohort, self.hours)
    }
}

/// Splits weekly hour totals into schedulable pieces: 5 -> 3+2, 4 -> 2+2.
///
/// # Errors
/// - [`ScheduleError::UnsupportedHours`] when the total is not in `2..=5`.
pub fn split_hours(row: &Row) -> super::Result<&'static [u32]> {
    match row.hours {
        2 => Ok(&[2]),
        3 => Ok(&[3]),
        4 => Ok(&[2, 2]),
        5 => Ok(&[3, 2]),
        hours => Err(ScheduleError::UnsupportedHours {
            code: row.code.clone(),
            hours,
        }),
    }
}

/// Builds the instance arena from offering rows.
/// Courses listed in `night_courses` are night-only, everything else is a day program.
///
/// # Errors
/// - [`ScheduleError::UnsupportedHours`] for rows that cannot be split.
pub fn load_instances<S: AsRef<str>>(
    rows: &[Row],
    night_courses: &[S],
) -> super::Result<Vec<DisciplineInstance>> {
    let mut instances = Vec::with_capacity(rows.len() * 2);

    for row in rows {
        let shift = if night_courses.iter().any(|c| c.as_ref() == row.course) {
            Shift::Night
        } else {
            Shift::Day
        };

        for &hours in split_hours(row)? {
            instances.push(DisciplineInstance::new(instances.len(), row, hours, shift));
        }
    }

    Ok(instances)
}
