use super::slots;
use crate::cast_u64;
use crate::core::{
    validate, validate_with_load, Colorer, Config, ConflictGraph, DisciplineInstance, LoadTable, Result, Schedule,
    ScheduleError, Timetable,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Drives build, color, assign and validate until a timetable is accepted
/// or the attempt bound is reached.
pub struct Orchestrator {
    colorer: Box<dyn Colorer>,
    config: Config,
}

impl Orchestrator {
    /// Creates a new orchestrator using the given colorer.
    #[must_use]
    pub fn new(colorer: Box<dyn Colorer>, config: Config) -> Self {
        Self { colorer, config }
    }

    /// Schedules the instances. Each attempt starts from cleared colors and slots.
    ///
    /// # Errors
    /// - [`ScheduleError::AttemptsExhausted`] with the last attempt's violations when no
    ///   attempt is accepted.
    pub fn run(&mut self, mut instances: Vec<DisciplineInstance>) -> Result<Schedule> {
        let graph = ConflictGraph::build(&instances);
        info!(
            instances = instances.len(),
            conflicts = graph.edge_count(),
            colorer = self.colorer.name(),
            "conflict graph built"
        );

        let mut last = None;
        for attempt in 0..self.config.attempts {
            match self.attempt(&mut instances, &graph, attempt) {
                Ok(timetable) => {
                    let schedule = Schedule::new(instances, timetable, attempt + 1);
                    info!(
                        attempts = schedule.attempts(),
                        colors = schedule.colors_used(),
                        cells = schedule.timetable().occupied(),
                        "timetable accepted"
                    );
                    return Ok(schedule);
                }
                Err(error) if error.is_recoverable() => {
                    debug!(attempt, %error, "attempt rejected");
                    last = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        let (violations, cause) = match last {
            Some(ScheduleError::ValidationFailed(violations)) => (violations, None),
            other => (Vec::new(), other.map(Box::new)),
        };
        for violation in &violations {
            warn!("{}", violation.describe(&instances));
        }
        if let Some(cause) = &cause {
            match cause.instance().and_then(|index| instances.get(index)) {
                Some(discipline) => warn!(%cause, %discipline, "last attempt aborted"),
                None => warn!(%cause, "last attempt aborted"),
            }
        }

        Err(ScheduleError::AttemptsExhausted {
            attempts: self.config.attempts,
            violations,
            cause,
        })
    }

    fn attempt(
        &mut self,
        instances: &mut [DisciplineInstance],
        graph: &ConflictGraph,
        attempt: usize,
    ) -> Result<Timetable> {
        instances.iter_mut().for_each(DisciplineInstance::reset);

        let coloring = self.colorer.color(graph);
        for (instance, color) in instances.iter_mut().zip(coloring) {
            instance.color = Some(color);
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(cast_u64(attempt)));
        let timetable = slots::assign(instances, graph, &mut rng, self.config.color_ceiling)?;

        let violations = if self.config.strict_load {
            validate_with_load(&timetable, instances, self.config.daily_cap)
        } else {
            validate(&timetable, instances)
        };

        if !self.config.strict_load && violations.is_empty() {
            for overload in LoadTable::compute(instances).overloads(self.config.daily_cap) {
                warn!(%overload, "daily load above cap");
            }
        }

        if violations.is_empty() {
            Ok(timetable)
        } else {
            Err(ScheduleError::ValidationFailed(violations))
        }
    }
}
