//! State transition engine.
//!
//! One pure function, [`apply_rating`], maps (card, rating, now) to a new
//! card snapshot. The dispatch is a single exhaustive `match` over
//! (state, rating): the full 4x4 table is checked at compile time, and
//! each cell reads as one line of policy.
//!
//! ## Growth floor
//!
//! Every successful review (Hard, Good, or Easy) pushes the interval by
//! at least one day past its previous value. Without the floor, a 1-day
//! card at minimum ease would get a longer delay from Hard than from
//! Good, inverting the rating order at the small-interval boundary.
//!
//! ## Rounding
//!
//! Interval growth uses `f64::round`, i.e. round half away from zero:
//! 2 days × ease 1.25 = 2.5 → 3 days. Pinned here and tested at the
//! boundary so persisted schedules never depend on host defaults.
//!
//! ## No fuzz
//!
//! Some schedulers jitter intervals to spread due dates. This one does
//! not; the only randomness in the crate is the new-card shuffle.

use chrono::{DateTime, Duration, Utc};

use crate::core::{Card, CardState, Rating, SchedulerConfig, SchedulerError};

/// Apply one rating to a card, returning the updated snapshot.
///
/// Pure: the input card is untouched, and identical inputs always produce
/// identical outputs. `now` must be captured once by the caller and
/// threaded through; the engine never reads a clock.
///
/// On every accepted rating: `reviews` increments by one and
/// `last_review` is set to `now`. `lapses` increments only on
/// `Review` × `Again`.
///
/// # Errors
///
/// - [`SchedulerError::InvalidConfig`] if the config cannot drive the
///   algorithm.
/// - [`SchedulerError::MalformedCard`] if the card's numeric fields fail
///   validation. Nothing is touched in either case.
pub fn apply_rating(
    card: &Card,
    rating: Rating,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Result<Card, SchedulerError> {
    config.validate()?;
    card.validate(config)?;

    let mut next = card.clone();

    match (card.state, rating) {
        // -- New / Learning: walking the learning steps ------------------
        (CardState::New | CardState::Learning, Rating::Again) => {
            next.state = CardState::Learning;
            next.step_index = 0;
            next.due = now + step_delay(&config.learning_steps, 0);
        }
        (CardState::New | CardState::Learning, Rating::Hard) => {
            next.state = CardState::Learning;
            next.due = now + step_delay(&config.learning_steps, next.step_index);
        }
        (CardState::New | CardState::Learning, Rating::Good) => {
            if next.step_index + 1 >= config.learning_steps.len() {
                graduate(&mut next, config.graduating_interval_days, now);
            } else {
                next.state = CardState::Learning;
                next.step_index += 1;
                next.due = now + step_delay(&config.learning_steps, next.step_index);
            }
        }
        (CardState::New | CardState::Learning, Rating::Easy) => {
            next.ease = clamp_ease(next.ease + config.ease_delta_easy, config);
            graduate(&mut next, config.easy_interval_days, now);
        }

        // -- Review: interval growth by ease -----------------------------
        (CardState::Review, Rating::Again) => {
            next.lapses += 1;
            next.state = CardState::Relearning;
            next.step_index = 0;
            next.ease = clamp_ease(next.ease + config.ease_delta_again, config);
            next.due = now + step_delay(&config.relearning_steps, 0);
        }
        (CardState::Review, Rating::Hard) => {
            next.ease = clamp_ease(next.ease + config.ease_delta_hard, config);
            let grown = grow_interval(f64::from(next.interval) * config.hard_interval_multiplier, config);
            next.interval = grown.max(next.interval + 1).min(config.max_interval_days);
            next.due = now + Duration::days(i64::from(next.interval));
        }
        (CardState::Review, Rating::Good) => {
            let grown = grow_interval(f64::from(next.interval) * next.ease, config);
            next.interval = grown.max(next.interval + 1).min(config.max_interval_days);
            next.due = now + Duration::days(i64::from(next.interval));
        }
        (CardState::Review, Rating::Easy) => {
            next.ease = clamp_ease(next.ease + config.ease_delta_easy, config);
            let grown = grow_interval(f64::from(next.interval) * next.ease * 1.3, config);
            next.interval = grown.max(next.interval + 1).min(config.max_interval_days);
            next.due = now + Duration::days(i64::from(next.interval));
        }

        // -- Relearning: walking the relearning steps --------------------
        (CardState::Relearning, Rating::Again) => {
            next.step_index = 0;
            next.due = now + step_delay(&config.relearning_steps, 0);
        }
        (CardState::Relearning, Rating::Hard) => {
            next.due = now + step_delay(&config.relearning_steps, next.step_index);
        }
        (CardState::Relearning, Rating::Good) => {
            if next.step_index + 1 >= config.relearning_steps.len() {
                let halved = grow_interval(f64::from(next.interval) * 0.5, config);
                graduate(&mut next, halved, now);
            } else {
                next.step_index += 1;
                next.due = now + step_delay(&config.relearning_steps, next.step_index);
            }
        }
        (CardState::Relearning, Rating::Easy) => {
            let reduced = grow_interval(f64::from(next.interval) * 0.7, config);
            graduate(&mut next, reduced, now);
        }
    }

    next.reviews += 1;
    next.last_review = Some(now);

    Ok(next)
}

/// Delay for a step, clamped to the last entry.
///
/// Validation guarantees `index` is in bounds; the clamp mirrors the
/// "stepIndex unchanged" Hard rule, which may sit on the final step.
fn step_delay(steps: &[u32], index: usize) -> Duration {
    let minutes = steps[index.min(steps.len() - 1)];
    Duration::minutes(i64::from(minutes))
}

/// Move a card into `Review` with the given interval.
fn graduate(card: &mut Card, interval_days: u32, now: DateTime<Utc>) {
    card.state = CardState::Review;
    card.interval = interval_days;
    card.step_index = 0;
    card.due = now + Duration::days(i64::from(interval_days));
}

/// Round a grown interval and clamp it into [1, max].
fn grow_interval(days: f64, config: &SchedulerConfig) -> u32 {
    let rounded = days.round();
    rounded.clamp(1.0, f64::from(config.max_interval_days)) as u32
}

fn clamp_ease(ease: f64, config: &SchedulerConfig) -> f64 {
    ease.clamp(config.min_ease, config.ease_ceiling)
}
