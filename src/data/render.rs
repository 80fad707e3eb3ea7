//! Plain-text views of an accepted schedule.

use crate::core::{Block, CohortKey, Day, DisciplineInstance, InstructorId, Schedule};
use std::collections::BTreeSet;

/// Weekly grid of every cohort, listing the disciplines of the cohort in each cell.
#[must_use]
pub fn by_cohort(schedule: &Schedule) -> String {
    let cohorts: BTreeSet<&CohortKey> = schedule.instances().iter().map(|i| &i.cohort).collect();

    cohorts
        .into_iter()
        .map(|cohort| {
            let members: Vec<_> = schedule.instances().iter().filter(|i| &i.cohort == cohort).collect();
            grid(&cohort.to_string(), &members, |i| i.code.clone())
        })
        .collect()
}

/// Weekly grid of every instructor, listing what they teach and to which cohort.
#[must_use]
pub fn by_instructor(schedule: &Schedule) -> String {
    let instructors: BTreeSet<InstructorId> = schedule
        .instances()
        .iter()
        .flat_map(|i| i.instructors.iter().copied())
        .collect();

    instructors
        .into_iter()
        .map(|instructor| {
            let members: Vec<_> = schedule
                .instances()
                .iter()
                .filter(|i| i.instructors.contains(&instructor))
                .collect();
            grid(&format!("Prof {instructor}"), &members, |i| {
                format!("{} ({})", i.code, i.cohort)
            })
        })
        .collect()
}

/// One title line, one line per weekday and a trailing blank line.
fn grid(title: &str, members: &[&DisciplineInstance], label: impl Fn(&DisciplineInstance) -> String) -> String {
    let mut lines = vec![format!("== {title} ==")];
    for day in Day::ALL {
        let cells: Vec<String> = Block::ALL
            .into_iter()
            .map(|block| {
                let held: Vec<_> = members
                    .iter()
                    .filter(|i| i.slot.is_some_and(|s| s.day == day && s.block == block))
                    .map(|i| label(i))
                    .collect();
                let held = if held.is_empty() { "free".into() } else { held.join(" + ") };
                format!("{block} {held}")
            })
            .collect();
        lines.push(format!("{:<10}{}", day.to_string(), cells.join(" | ")));
    }
    lines.push(String::new());
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::fixtures::row;
    use crate::core::{load_instances, Slot, Timetable};

    fn schedule() -> anyhow::Result<Schedule> {
        let rows = vec![row("CCO", "2", "A", 3, &[1]), row("SIN", "4", "B", 2, &[1])];
        let mut instances = load_instances(&rows, &["SIN"])?;
        let mut timetable = Timetable::new();

        let first = Slot::new(Day::Monday, Block::AfternoonLate);
        let second = Slot::new(Day::Tuesday, Block::NightEarly);
        timetable.bind(first, 0);
        timetable.bind(second, 1);
        instances[0].color = Some(0);
        instances[0].slot = Some(first);
        instances[1].color = Some(1);
        instances[1].slot = Some(second);

        Ok(Schedule::new(instances, timetable, 1))
    }

    #[test]
    fn cohort_view_should_show_each_cohort_with_free_cells() -> anyhow::Result<()> {
        let view = by_cohort(&schedule()?);

        assert!(view.contains("== CCO-2020.2 =="));
        assert!(view.contains("== SIN-2020.4 =="));
        assert!(view.contains("T345 A"));
        assert!(view.contains("N12 B"));
        assert!(view.contains("M123 free"));
        assert_eq!(view.lines().count(), 14);
        assert!(view.ends_with("\n\n"));
        Ok(())
    }

    #[test]
    fn instructor_view_should_merge_their_cohorts() -> anyhow::Result<()> {
        let view = by_instructor(&schedule()?);

        assert_eq!(view.matches("== Prof").count(), 1);
        assert!(view.contains("T345 A (CCO-2020.2)"));
        assert!(view.contains("N12 B (SIN-2020.4)"));
        Ok(())
    }
}
