//! Card model: one vocabulary item's scheduling state.
//!
//! A `Card` is a value-semantic snapshot. The scheduler never mutates a
//! caller-held card; rating a card produces a new snapshot and the caller
//! decides what to persist. This is what makes due-time previews safe to
//! run four at a time against the same source card.
//!
//! ## State Machine
//!
//! ```text
//! NEW ──────> LEARNING ──────> REVIEW <──────> RELEARNING
//!  \________________________________/^
//!           (EASY graduates early)
//! ```
//!
//! State tags are an exhaustive enum. Persisted data with an unknown tag
//! fails `CardState::parse` with an explicit error rather than being
//! coerced into a guessed branch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::SchedulerConfig;
use super::error::SchedulerError;

/// Unique identifier for a card.
///
/// Assigned by the vocabulary capture collaborator; opaque to the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Scheduling state of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Never rated; waits in the new queue.
    New,
    /// Working through the learning steps (sub-day delays).
    Learning,
    /// Graduated; due dates grow by the ease multiplier, in days.
    Review,
    /// Lapsed from review; working through the relearning steps.
    Relearning,
}

impl CardState {
    /// Stable string tag for persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardState::New => "new",
            CardState::Learning => "learning",
            CardState::Review => "review",
            CardState::Relearning => "relearning",
        }
    }

    /// Parse a persisted state tag.
    ///
    /// An unknown tag is corrupted data and surfaces as
    /// `SchedulerError::InvalidCardState`; it is never defaulted.
    pub fn parse(tag: &str) -> Result<Self, SchedulerError> {
        match tag {
            "new" => Ok(CardState::New),
            "learning" => Ok(CardState::Learning),
            "review" => Ok(CardState::Review),
            "relearning" => Ok(CardState::Relearning),
            other => Err(SchedulerError::InvalidCardState(other.to_string())),
        }
    }

    /// Does this state use the learning step sequence?
    ///
    /// `New` cards are about to enter it; `Relearning` cards use the
    /// relearning sequence instead.
    #[must_use]
    pub const fn uses_learning_steps(self) -> bool {
        matches!(self, CardState::New | CardState::Learning)
    }
}

impl std::fmt::Display for CardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Learner's self-assessed recall quality for one showing of a card.
///
/// Ordinal: `Again < Hard < Good < Easy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// Forgot it; repeat from the first step.
    Again,
    /// Recalled with difficulty.
    Hard,
    /// Recalled correctly.
    Good,
    /// Recalled instantly.
    Easy,
}

impl Rating {
    /// All four ratings in ordinal order, for preview and iteration.
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Stable string tag for persistence and UI wiring.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }

    /// Parse a rating tag coming in from outside the crate.
    pub fn parse(tag: &str) -> Result<Self, SchedulerError> {
        match tag {
            "again" => Ok(Rating::Again),
            "hard" => Ok(Rating::Hard),
            "good" => Ok(Rating::Good),
            "easy" => Ok(Rating::Easy),
            other => Err(SchedulerError::InvalidRating(other.to_string())),
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = SchedulerError;

    /// Convert an ordinal rating value (0..=3) from a UI control.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rating::Again),
            1 => Ok(Rating::Hard),
            2 => Ok(Rating::Good),
            3 => Ok(Rating::Easy),
            other => Err(SchedulerError::InvalidRating(other.to_string())),
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vocabulary item's scheduling snapshot.
///
/// All fields are plain data; cloning a card is cheap and the scheduler
/// relies on clone-and-modify for every transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier (assigned by the capture collaborator).
    pub id: CardId,

    /// The vocabulary word.
    pub word: String,

    /// Its translation.
    pub translation: String,

    /// Optional sentence the word was captured from.
    pub context: Option<String>,

    /// Current scheduling state.
    pub state: CardState,

    /// Ease multiplier; review intervals grow by this factor.
    pub ease: f64,

    /// Review interval in days. 0 until the card first reaches `Review`.
    pub interval: u32,

    /// Index into the active step sequence (learning or relearning).
    pub step_index: usize,

    /// When the card next becomes eligible.
    pub due: DateTime<Utc>,

    /// Count of ratings ever applied.
    pub reviews: u32,

    /// Count of `Again` ratings applied while in `Review`.
    pub lapses: u32,

    /// Timestamp of the most recent rating, if any.
    pub last_review: Option<DateTime<Utc>>,
}

impl Card {
    /// Create the initial snapshot for a freshly captured vocabulary item.
    ///
    /// The card starts in `New`, due immediately, with the configured
    /// starting ease.
    #[must_use]
    pub fn new(
        id: CardId,
        word: impl Into<String>,
        translation: impl Into<String>,
        created_at: DateTime<Utc>,
        starting_ease: f64,
    ) -> Self {
        Self {
            id,
            word: word.into(),
            translation: translation.into(),
            context: None,
            state: CardState::New,
            ease: starting_ease,
            interval: 0,
            step_index: 0,
            due: created_at,
            reviews: 0,
            lapses: 0,
            last_review: None,
        }
    }

    /// Attach the sentence the word was captured from.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Is the card eligible for study at `now`?
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due <= now
    }

    /// The step sequence active for this card's state.
    ///
    /// `Review` cards are between steps; they get the learning sequence
    /// only for bounds-checking purposes (their `step_index` is unused).
    #[must_use]
    pub fn active_steps<'a>(&self, config: &'a SchedulerConfig) -> &'a [u32] {
        match self.state {
            CardState::Relearning => &config.relearning_steps,
            _ => &config.learning_steps,
        }
    }

    /// Check the numeric fields hold values the scheduler can work with.
    ///
    /// Persisted data can arrive corrupted: a NaN ease, an interval past
    /// the cap, a step index outside the active sequence. These are
    /// data-integrity failures and are rejected before any transition
    /// touches the card.
    pub fn validate(&self, config: &SchedulerConfig) -> Result<(), SchedulerError> {
        if !self.ease.is_finite() || self.ease <= 0.0 {
            return Err(self.malformed(format!("ease is not a positive number: {}", self.ease)));
        }
        if self.interval > config.max_interval_days {
            return Err(self.malformed(format!(
                "interval {} exceeds cap {}",
                self.interval, config.max_interval_days
            )));
        }
        let steps = self.active_steps(config);
        if self.step_index >= steps.len() {
            return Err(self.malformed(format!(
                "step index {} out of bounds for {} steps",
                self.step_index,
                steps.len()
            )));
        }
        Ok(())
    }

    fn malformed(&self, reason: String) -> SchedulerError {
        SchedulerError::MalformedCard {
            id: self.id,
            reason,
        }
    }
}
