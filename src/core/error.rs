use super::Violation;
use thiserror::Error;

/// Result of the scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors raised while building a timetable.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The slot engine ran out of colors while placing an instance.
    #[error("instance {instance} needs a color at or above the ceiling of {ceiling}")]
    ColorCeilingExceeded { instance: usize, ceiling: usize },

    /// No cell of the week can take the instance under any color.
    #[error("no feasible cell for instance {instance}")]
    NoFeasibleCell { instance: usize },

    /// The timetable was complete but broke at least one constraint.
    #[error("timetable has {} violation(s)", .0.len())]
    ValidationFailed(Vec<Violation>),

    /// The orchestrator reached its attempt bound without an accepted timetable.
    #[error("no timetable accepted after {attempts} attempt(s)")]
    AttemptsExhausted {
        attempts: usize,
        violations: Vec<Violation>,
        #[source]
        cause: Option<Box<ScheduleError>>,
    },

    /// An offering row carries a weekly hour total that cannot be split.
    #[error("discipline {code} has unsupported weekly hours {hours}")]
    UnsupportedHours { code: String, hours: u32 },
}

impl ScheduleError {
    /// Returns whether the error only aborts the current attempt.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ColorCeilingExceeded { .. } | Self::NoFeasibleCell { .. } | Self::ValidationFailed(_)
        )
    }

    /// Returns the instance the slot engine could not place, if any.
    #[must_use]
    pub const fn instance(&self) -> Option<usize> {
        match self {
            Self::ColorCeilingExceeded { instance, .. } | Self::NoFeasibleCell { instance } => Some(*instance),
            _ => None,
        }
    }
}
