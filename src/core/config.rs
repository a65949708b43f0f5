//! Scheduler configuration.
//!
//! Every numeric knob of the algorithm lives here: the learning and
//! relearning step sequences, ease bounds and deltas, graduation intervals,
//! and the global interval cap. Nothing in the transition engine is
//! hard-coded; callers tune behavior by constructing a config.
//!
//! Defaults match the classic simplified-SM-2 policy: two learning steps
//! (1 and 10 minutes), one relearning step (10 minutes), ease 2.5 bounded
//! to [1.3, 3.0].

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::error::SchedulerError;

/// Step sequences are short (two or three entries in practice), so they
/// live inline.
pub type Steps = SmallVec<[u32; 4]>;

/// Tunable constants for the transition engine.
///
/// Construct with `Default` and adjust via the `with_*` builders:
///
/// ```
/// use srs_engine::SchedulerConfig;
///
/// let config = SchedulerConfig::default()
///     .with_learning_steps([1, 10, 60])
///     .with_max_interval_days(365);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Delays (minutes) a card walks through while `Learning`.
    pub learning_steps: Steps,

    /// Delays (minutes) a lapsed card walks through while `Relearning`.
    pub relearning_steps: Steps,

    /// Interval (days) granted when a card graduates via `Good`.
    pub graduating_interval_days: u32,

    /// Interval (days) granted when a card graduates early via `Easy`.
    pub easy_interval_days: u32,

    /// Ease assigned to brand-new cards.
    pub starting_ease: f64,

    /// Ease floor; no rating can push ease below this.
    pub min_ease: f64,

    /// Ease ceiling; no rating can push ease above this.
    pub ease_ceiling: f64,

    /// Ease delta applied on `Again` in review (negative).
    pub ease_delta_again: f64,

    /// Ease delta applied on `Hard` in review (negative).
    pub ease_delta_hard: f64,

    /// Ease delta applied on `Easy` (positive).
    pub ease_delta_easy: f64,

    /// Interval growth factor for `Hard` in review.
    pub hard_interval_multiplier: f64,

    /// Global interval cap in days.
    pub max_interval_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            learning_steps: smallvec![1, 10],
            relearning_steps: smallvec![10],
            graduating_interval_days: 1,
            easy_interval_days: 4,
            starting_ease: 2.5,
            min_ease: 1.3,
            ease_ceiling: 3.0,
            ease_delta_again: -0.2,
            ease_delta_hard: -0.15,
            ease_delta_easy: 0.15,
            hard_interval_multiplier: 1.2,
            max_interval_days: 36_500,
        }
    }
}

impl SchedulerConfig {
    /// Replace the learning step sequence.
    #[must_use]
    pub fn with_learning_steps(mut self, minutes: impl IntoIterator<Item = u32>) -> Self {
        self.learning_steps = minutes.into_iter().collect();
        self
    }

    /// Replace the relearning step sequence.
    #[must_use]
    pub fn with_relearning_steps(mut self, minutes: impl IntoIterator<Item = u32>) -> Self {
        self.relearning_steps = minutes.into_iter().collect();
        self
    }

    /// Set the graduating interval.
    #[must_use]
    pub fn with_graduating_interval_days(mut self, days: u32) -> Self {
        self.graduating_interval_days = days;
        self
    }

    /// Set the early-graduation interval for `Easy`.
    #[must_use]
    pub fn with_easy_interval_days(mut self, days: u32) -> Self {
        self.easy_interval_days = days;
        self
    }

    /// Set the starting ease for new cards.
    #[must_use]
    pub fn with_starting_ease(mut self, ease: f64) -> Self {
        self.starting_ease = ease;
        self
    }

    /// Set the ease floor and ceiling.
    #[must_use]
    pub fn with_ease_bounds(mut self, min_ease: f64, ease_ceiling: f64) -> Self {
        self.min_ease = min_ease;
        self.ease_ceiling = ease_ceiling;
        self
    }

    /// Set the global interval cap.
    #[must_use]
    pub fn with_max_interval_days(mut self, days: u32) -> Self {
        self.max_interval_days = days;
        self
    }

    /// Check the configuration is usable.
    ///
    /// Config is caller-supplied data and gets the same explicit-failure
    /// treatment as card data: empty step lists, zero-length steps,
    /// inverted ease bounds, and a zero interval cap are all rejected.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.learning_steps.is_empty() {
            return Err(SchedulerError::InvalidConfig(
                "learning steps must not be empty".to_string(),
            ));
        }
        if self.relearning_steps.is_empty() {
            return Err(SchedulerError::InvalidConfig(
                "relearning steps must not be empty".to_string(),
            ));
        }
        if self
            .learning_steps
            .iter()
            .chain(self.relearning_steps.iter())
            .any(|&m| m == 0)
        {
            return Err(SchedulerError::InvalidConfig(
                "step durations must be at least one minute".to_string(),
            ));
        }
        if !(self.min_ease.is_finite() && self.ease_ceiling.is_finite())
            || self.min_ease <= 0.0
            || self.min_ease > self.ease_ceiling
        {
            return Err(SchedulerError::InvalidConfig(format!(
                "ease bounds [{}, {}] are not an ordered positive range",
                self.min_ease, self.ease_ceiling
            )));
        }
        if !self.starting_ease.is_finite() || self.starting_ease <= 0.0 {
            return Err(SchedulerError::InvalidConfig(format!(
                "starting ease {} is not a positive number",
                self.starting_ease
            )));
        }
        if !self.ease_delta_again.is_finite() || self.ease_delta_again > 0.0 {
            return Err(SchedulerError::InvalidConfig(format!(
                "ease delta for again must be finite and non-positive, got {}",
                self.ease_delta_again
            )));
        }
        if !self.ease_delta_hard.is_finite() || self.ease_delta_hard > 0.0 {
            return Err(SchedulerError::InvalidConfig(format!(
                "ease delta for hard must be finite and non-positive, got {}",
                self.ease_delta_hard
            )));
        }
        if !self.ease_delta_easy.is_finite() || self.ease_delta_easy < 0.0 {
            return Err(SchedulerError::InvalidConfig(format!(
                "ease delta for easy must be finite and non-negative, got {}",
                self.ease_delta_easy
            )));
        }
        if !self.hard_interval_multiplier.is_finite() || self.hard_interval_multiplier < 1.0 {
            return Err(SchedulerError::InvalidConfig(format!(
                "hard interval multiplier must be finite and at least 1, got {}",
                self.hard_interval_multiplier
            )));
        }
        if self.graduating_interval_days == 0 || self.easy_interval_days == 0 {
            return Err(SchedulerError::InvalidConfig(
                "graduation intervals must be at least one day".to_string(),
            ));
        }
        if self.max_interval_days == 0 {
            return Err(SchedulerError::InvalidConfig(
                "max interval must be at least one day".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-session size limits for the study queue.
///
/// Learning cards are deliberately uncapped: a short-horizon commitment
/// made minutes ago must never be silently dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueLimits {
    /// Maximum new cards introduced per session.
    pub new_limit: usize,

    /// Maximum review cards per session.
    pub review_limit: usize,
}

impl Default for QueueLimits {
    fn default() -> Self {
        Self {
            new_limit: 20,
            review_limit: 200,
        }
    }
}

impl QueueLimits {
    /// Set the new-card cap.
    #[must_use]
    pub fn with_new_limit(mut self, limit: usize) -> Self {
        self.new_limit = limit;
        self
    }

    /// Set the review cap.
    #[must_use]
    pub fn with_review_limit(mut self, limit: usize) -> Self {
        self.review_limit = limit;
        self
    }
}
