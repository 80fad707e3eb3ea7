use crate::core::{
    Block, ConflictGraph, Day, DisciplineInstance, Result, ScheduleError, Shift, Slot, Timetable,
};
use ahash::HashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// Blocks an instance may occupy, in preference order, followed by overflow blocks.
/// Three-hour instances need a three-period block. Two-hour instances use two-period
/// blocks and only fall back to the three-period ones when those are exhausted.
#[must_use]
pub const fn eligible_blocks(shift: Shift, hours: u32) -> (&'static [Block], &'static [Block]) {
    match (shift, hours) {
        (Shift::Day, 3) => (&[Block::AfternoonLate, Block::MorningEarly], &[]),
        (Shift::Night, 3) => (&[Block::NightLate], &[]),
        (Shift::Day, _) => (
            &[Block::AfternoonEarly, Block::MorningLate],
            &[Block::AfternoonLate, Block::MorningEarly],
        ),
        (Shift::Night, _) => (&[Block::NightEarly], &[Block::NightLate]),
    }
}

/// Binds every colored instance to a cell of a fresh timetable.
///
/// Three-hour instances go first, then two-hour ones, each group in an order
/// shuffled with `rng`. An instance reuses a cell already holding its color.
/// When no eligible cell fits, the instance moves to the next color that none of
/// its conflicts hold and the scan is repeated.
///
/// # Errors
/// - [`ScheduleError::ColorCeilingExceeded`] if an instance would need a color at or above `ceiling`.
/// - [`ScheduleError::NoFeasibleCell`] if no eligible cell could ever take the instance.
pub fn assign(
    instances: &mut [DisciplineInstance],
    graph: &ConflictGraph,
    rng: &mut impl Rng,
    ceiling: usize,
) -> Result<Timetable> {
    let mut timetable = Timetable::new();

    let (mut long, mut short): (Vec<usize>, Vec<usize>) =
        (0..instances.len()).partition(|&index| instances[index].hours == 3);
    long.shuffle(rng);
    short.shuffle(rng);

    for index in long.into_iter().chain(short) {
        place(instances, index, graph, &mut timetable, ceiling)?;
    }

    Ok(timetable)
}

fn place(
    instances: &mut [DisciplineInstance],
    index: usize,
    graph: &ConflictGraph,
    timetable: &mut Timetable,
    ceiling: usize,
) -> Result<()> {
    let (primary, overflow) = eligible_blocks(instances[index].shift, instances[index].hours);
    let long = instances[index].hours == 3;
    let mut color = instances[index].color.unwrap_or_default();
    if color >= ceiling {
        return Err(ScheduleError::ColorCeilingExceeded { instance: index, ceiling });
    }

    loop {
        let found = if long {
            first_cell(timetable, primary, |held| held.map_or(true, |held| held == color))
        } else {
            first_cell(timetable, primary, |held| held == Some(color))
                .or_else(|| first_cell(timetable, overflow, |held| held == Some(color)))
                .or_else(|| first_cell(timetable, primary, |held| held.is_none()))
                .or_else(|| first_cell(timetable, overflow, |held| held.is_none()))
        };

        if let Some(slot) = found {
            trace!(index, color, day = %slot.day, block = %slot.block, "bound");
            timetable.bind(slot, color);
            instances[index].color = Some(color);
            instances[index].slot = Some(slot);
            return Ok(());
        }

        let conflicts = graph.conflicts(index).iter();
        let blocked: HashSet<_> = conflicts.filter_map(|&other| instances[other].color).collect();

        color = (color + 1..)
            .find(|candidate| !blocked.contains(candidate))
            .unwrap_or(usize::MAX);
        if color >= ceiling {
            return Err(ScheduleError::ColorCeilingExceeded { instance: index, ceiling });
        }

        // Every eligible cell is taken, so only a held color above the current one can help.
        let reachable = first_cell(timetable, primary, |held| {
            held.is_some_and(|held| held >= color && held < ceiling && !blocked.contains(&held))
        })
        .or_else(|| {
            first_cell(timetable, overflow, |held| {
                held.is_some_and(|held| held >= color && held < ceiling && !blocked.contains(&held))
            })
        });
        if reachable.is_none() {
            return Err(ScheduleError::NoFeasibleCell { instance: index });
        }
    }
}

/// First cell, scanning days then blocks, whose held color satisfies `accept`.
fn first_cell(
    timetable: &Timetable,
    blocks: &[Block],
    accept: impl Fn(Option<usize>) -> bool,
) -> Option<Slot> {
    Day::ALL
        .into_iter()
        .flat_map(|day| blocks.iter().map(move |&block| Slot::new(day, block)))
        .find(|&slot| accept(timetable.get(slot)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::fixtures::row;
    use crate::core::{load_instances, validate, Colorer, Row};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn colored(rows: &[Row], colors: &[usize]) -> anyhow::Result<Vec<DisciplineInstance>> {
        let mut instances = load_instances(rows, &["SIN"])?;
        for (instance, &color) in instances.iter_mut().zip(colors) {
            instance.color = Some(color);
        }
        Ok(instances)
    }

    fn clique(course: &str, hours: u32, size: usize) -> Vec<Row> {
        (0..size)
            .map(|i| row(course, "2", &format!("D{i}"), hours, &[]))
            .collect()
    }

    #[test]
    fn shared_color_should_share_the_cell() -> anyhow::Result<()> {
        let rows = vec![row("CCO", "2", "A", 3, &[1]), row("CCO", "4", "B", 3, &[2])];
        let mut instances = colored(&rows, &[0, 0])?;
        let graph = ConflictGraph::build(&instances);

        let timetable = assign(&mut instances, &graph, &mut StdRng::seed_from_u64(3), 20)?;

        let cell = Slot::new(Day::Monday, Block::AfternoonLate);
        assert_eq!(instances[0].slot, Some(cell));
        assert_eq!(instances[1].slot, Some(cell));
        assert_eq!(timetable.occupied(), 1);
        assert!(validate(&timetable, &instances).is_empty());
        Ok(())
    }

    #[test]
    fn shared_instructor_should_never_share_a_cell() -> anyhow::Result<()> {
        let rows = vec![row("CCO", "2", "A", 2, &[1]), row("CCO", "4", "B", 2, &[1, 2])];
        let mut instances = load_instances(&rows, &["SIN"])?;
        let graph = ConflictGraph::build(&instances);
        let coloring = crate::algo::DSatur.color(&graph);
        for (instance, color) in instances.iter_mut().zip(coloring) {
            instance.color = Some(color);
        }

        assign(&mut instances, &graph, &mut StdRng::seed_from_u64(0), 20)?;

        assert!(graph.are_conflicted(0, 1));
        assert_ne!(instances[0].color, instances[1].color);
        assert_ne!(instances[0].slot, instances[1].slot);
        Ok(())
    }

    #[test]
    fn night_program_should_stay_in_night_blocks() -> anyhow::Result<()> {
        let rows = vec![
            row("SIN", "2", "A", 3, &[1]),
            row("SIN", "2", "B", 2, &[2]),
            row("CCO", "2", "C", 3, &[3]),
            row("CCO", "2", "D", 2, &[4]),
        ];
        let mut instances = colored(&rows, &[0, 1, 0, 1])?;
        let graph = ConflictGraph::build(&instances);

        assign(&mut instances, &graph, &mut StdRng::seed_from_u64(1), 20)?;

        let blocks: Vec<_> = instances.iter().filter_map(|i| i.slot.map(|s| s.block)).collect();
        assert_eq!(
            blocks,
            vec![Block::NightLate, Block::NightEarly, Block::AfternoonLate, Block::AfternoonEarly]
        );
        Ok(())
    }

    #[test]
    fn short_instances_should_reuse_before_taking_new_cells() -> anyhow::Result<()> {
        let rows = vec![row("CCO", "2", "A", 3, &[1]), row("CCO", "4", "B", 2, &[2])];
        let mut instances = colored(&rows, &[5, 5])?;
        let graph = ConflictGraph::build(&instances);

        let timetable = assign(&mut instances, &graph, &mut StdRng::seed_from_u64(0), 20)?;

        assert_eq!(instances[1].slot, Some(Slot::new(Day::Monday, Block::AfternoonLate)));
        assert_eq!(timetable.occupied(), 1);
        Ok(())
    }

    #[test]
    fn short_instances_should_overflow_into_long_blocks() -> anyhow::Result<()> {
        let rows = clique("CCO", 2, 12);
        let colors: Vec<_> = (0..12).collect();
        let mut instances = colored(&rows, &colors)?;
        let graph = ConflictGraph::build(&instances);

        let timetable = assign(&mut instances, &graph, &mut StdRng::seed_from_u64(9), 20)?;

        let long = instances
            .iter()
            .filter_map(|i| i.slot)
            .filter(|slot| slot.block.periods() == 3)
            .count();
        assert_eq!(long, 2);
        assert_eq!(timetable.occupied(), 12);
        assert!(validate(&timetable, &instances).is_empty());
        Ok(())
    }

    #[test]
    fn full_week_should_move_to_a_reachable_color() -> anyhow::Result<()> {
        // Four night classes of one cohort and X of another cohort fill every night slot.
        let mut rows = clique("SIN", 3, 5);
        rows.push(row("SIN", "4", "X", 3, &[9]));
        let mut instances = colored(&rows, &[0, 1, 2, 3, 4, 7])?;
        let graph = ConflictGraph::build(&instances);

        let mut timetable = Timetable::new();
        for (day, index) in Day::ALL.into_iter().zip([0, 1, 2, 3, 5]) {
            let slot = Slot::new(day, Block::NightLate);
            timetable.bind(slot, instances[index].color.unwrap_or_default());
            instances[index].slot = Some(slot);
        }

        place(&mut instances, 4, &graph, &mut timetable, 20)?;

        assert_eq!(instances[4].color, Some(7));
        assert_eq!(instances[4].slot, Some(Slot::new(Day::Friday, Block::NightLate)));
        assert!(validate(&timetable, &instances).is_empty());
        Ok(())
    }

    #[test]
    fn overfull_cohort_should_fail_the_attempt() -> anyhow::Result<()> {
        let rows = clique("SIN", 3, 6);
        let colors: Vec<_> = (0..6).collect();
        let instances = colored(&rows, &colors)?;
        let graph = ConflictGraph::build(&instances);

        let result = assign(&mut instances.clone(), &graph, &mut StdRng::seed_from_u64(0), 20);
        assert!(matches!(result, Err(ScheduleError::NoFeasibleCell { .. })));

        let result = assign(&mut instances.clone(), &graph, &mut StdRng::seed_from_u64(0), 6);
        assert!(matches!(
            result,
            Err(ScheduleError::ColorCeilingExceeded { ceiling: 6, .. })
        ));
        Ok(())
    }

    #[test]
    fn colors_above_the_ceiling_should_be_rejected() -> anyhow::Result<()> {
        let rows = vec![row("CCO", "2", "A", 2, &[1])];
        let mut instances = colored(&rows, &[25])?;
        let graph = ConflictGraph::build(&instances);

        let result = assign(&mut instances, &graph, &mut StdRng::seed_from_u64(0), 20);

        assert!(matches!(
            result,
            Err(ScheduleError::ColorCeilingExceeded { instance: 0, ceiling: 20 })
        ));
        assert_eq!(instances[0].slot, None);
        Ok(())
    }

    #[test]
    fn same_seed_should_give_the_same_timetable() -> anyhow::Result<()> {
        let rows = crate::core::fixtures::offering();
        let mut first = load_instances(&rows, &["SIN"])?;
        let graph = ConflictGraph::build(&first);
        let coloring = crate::algo::DSatur.color(&graph);
        for (instance, color) in first.iter_mut().zip(coloring) {
            instance.color = Some(color);
        }
        let mut second = first.clone();

        let a = assign(&mut first, &graph, &mut StdRng::seed_from_u64(42), 20)?;
        let b = assign(&mut second, &graph, &mut StdRng::seed_from_u64(42), 20)?;

        assert_eq!(a, b);
        assert_eq!(first, second);
        Ok(())
    }
}
