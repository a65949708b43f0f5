//! Due-time preview: forecast all four rating outcomes.
//!
//! The presentation layer labels its four rating buttons with how far
//! each choice would push the card ("10m", "4d", "2mo"). Each forecast
//! runs the transition engine on an independent copy; nothing is
//! committed and the source card is byte-for-byte unchanged afterwards.

use chrono::{DateTime, Utc};

use crate::core::{Card, Rating, SchedulerConfig, SchedulerError};
use crate::scheduler::transition::apply_rating;

/// Forecast strings for the four ratings, in ordinal order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DueForecast {
    /// Forecast if rated `Again`.
    pub again: String,
    /// Forecast if rated `Hard`.
    pub hard: String,
    /// Forecast if rated `Good`.
    pub good: String,
    /// Forecast if rated `Easy`.
    pub easy: String,
}

impl DueForecast {
    /// Look up the forecast for one rating.
    #[must_use]
    pub fn get(&self, rating: Rating) -> &str {
        match rating {
            Rating::Again => &self.again,
            Rating::Hard => &self.hard,
            Rating::Good => &self.good,
            Rating::Easy => &self.easy,
        }
    }
}

/// Compute how far each rating would push the card's due time.
///
/// The four computations are mutually independent: each runs
/// [`apply_rating`] against its own copy of `card`, so no call can
/// observe another's effects, and repeated previews of an unchanged card
/// return identical forecasts.
///
/// # Errors
///
/// Same rejection rules as [`apply_rating`]; a card the engine would
/// refuse to rate cannot be previewed either.
pub fn preview(
    card: &Card,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Result<DueForecast, SchedulerError> {
    let mut forecasts = Rating::ALL
        .iter()
        .map(|&rating| {
            let outcome = apply_rating(card, rating, now, config)?;
            Ok(format_delay(now, outcome.due))
        })
        .collect::<Result<Vec<_>, SchedulerError>>()?
        .into_iter();

    // Rating::ALL is ordinal, so the iterator yields again..easy.
    Ok(DueForecast {
        again: forecasts.next().unwrap_or_default(),
        hard: forecasts.next().unwrap_or_default(),
        good: forecasts.next().unwrap_or_default(),
        easy: forecasts.next().unwrap_or_default(),
    })
}

/// Render a future delay as a short label.
///
/// Buckets: under 60 minutes → minutes, under 24 hours → hours, under 30
/// day-equivalents → days, under 365 → months (30-day months), else
/// years. Minutes through months round to whole units; years keep one
/// decimal ("1.5y"), dropping a trailing zero ("2y"). A sub-minute delay
/// renders as "1m", never "0m".
fn format_delay(now: DateTime<Utc>, due: DateTime<Utc>) -> String {
    let minutes = (due - now).num_seconds().max(0) as f64 / 60.0;
    let days = minutes / 1440.0;

    if minutes < 60.0 {
        format!("{}m", (minutes.round() as i64).max(1))
    } else if minutes < 1440.0 {
        format!("{}h", (minutes / 60.0).round() as i64)
    } else if days < 30.0 {
        format!("{}d", days.round() as i64)
    } else if days < 365.0 {
        format!("{}mo", (days / 30.0).round() as i64)
    } else {
        let years = (days / 365.0 * 10.0).round() / 10.0;
        if years.fract() == 0.0 {
            format!("{}y", years as i64)
        } else {
            format!("{years:.1}y")
        }
    }
}
