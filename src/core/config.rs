use clap::Args;
use serde::{Deserialize, Serialize};

/// Settings of one scheduling run. Every field is also a command line flag.
#[non_exhaustive]
#[derive(Args, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of color-assign-validate attempts.
    #[arg(long, default_value_t = 250)]
    pub attempts: usize,
    /// Seed of the first attempt. Attempt `k` uses `seed + k`.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Colors at or above this value are never handed out by the slot engine.
    #[arg(long, default_value_t = 20)]
    pub color_ceiling: usize,
    /// Maximum hours an instructor may teach in one day.
    #[arg(long, default_value_t = 6)]
    pub daily_cap: u32,
    /// Whether daily overloads reject the attempt instead of being logged.
    #[arg(long)]
    pub strict_load: bool,
    /// Programs restricted to night blocks.
    #[arg(long, value_delimiter = ',', default_values_t = [String::from("SIN")])]
    pub night_courses: Vec<String>,
}

impl Config {
    /// Returns the config with the given seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the config with the given attempt bound.
    #[must_use]
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Returns the config with the given color ceiling.
    #[must_use]
    pub fn with_color_ceiling(mut self, color_ceiling: usize) -> Self {
        self.color_ceiling = color_ceiling;
        self
    }

    /// Returns the config with the given daily hour cap.
    #[must_use]
    pub fn with_daily_cap(mut self, daily_cap: u32) -> Self {
        self.daily_cap = daily_cap;
        self
    }

    /// Returns the config with the given night-only programs.
    #[must_use]
    pub fn with_night_courses<S: Into<String>>(mut self, courses: impl IntoIterator<Item = S>) -> Self {
        self.night_courses = courses.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the config with daily overloads made fatal for an attempt.
    #[must_use]
    pub fn with_strict_load(mut self, strict_load: bool) -> Self {
        self.strict_load = strict_load;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attempts: 250,
            seed: 0,
            color_ceiling: 20,
            daily_cap: 6,
            strict_load: false,
            night_courses: vec!["SIN".into()],
        }
    }
}
