#![deny(clippy::all, clippy::cargo, clippy::expect_used, clippy::unwrap_used)]
#![deny(clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(clippy::unimplemented, clippy::redundant_type_annotations)]

use anyhow::Result;
use std::io::Read;

pub mod algo;
pub mod core;
pub mod data;

/// Schedules the offering read from reader with the given colorer and writes
/// the cohort and instructor views to stdout.
///
/// # Errors
/// - If the offering could not be read from the reader.
/// - If no timetable was accepted within the configured attempts.
pub fn run_reader(colorer: Box<dyn core::Colorer>, reader: impl Read, config: &core::Config) -> Result<()> {
    let rows = data::read_rows(reader)?;
    let instances = core::load_instances(&rows, &config.night_courses)?;
    let schedule = algo::Orchestrator::new(colorer, config.clone()).run(instances)?;

    debug_assert!(
        core::validate(schedule.timetable(), schedule.instances()).is_empty(),
        "Schedule is invalid: {schedule:?}"
    );

    println!("{}", data::render::by_cohort(&schedule));
    println!("{}", data::render::by_instructor(&schedule));
    println!("Colors used: {}", schedule.colors_used());

    Ok(())
}

#[cfg(not(target_pointer_width = "64"))]
compile_error!("Must be 64-bit system!");

/// Casts the given value to `u64`.
/// It should never fail on 64-bit systems.
///
/// # Panics
/// - If the value cannot be cast to `usize`.
#[must_use]
pub fn cast_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or_else(|_| unreachable!("Must be 64-bit system!"))
}
