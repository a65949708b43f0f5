//! # srs-engine
//!
//! A spaced-repetition scheduling core for vocabulary flashcards.
//!
//! ## Design Principles
//!
//! 1. **Pure Computation**: No I/O, no clocks, no global state. Every
//!    operation takes an explicit `now` and returns a fresh snapshot;
//!    caller-held cards are never mutated.
//!
//! 2. **Configuration Over Convention**: Step sequences, ease bounds, and
//!    interval caps live in [`SchedulerConfig`], not in constants.
//!
//! 3. **Fail Loud on Bad Data**: An unknown state tag or a non-finite ease
//!    is an error, never a silently-guessed default.
//!
//! 4. **Injectable Randomness**: The only non-deterministic step (the
//!    new-card shuffle) goes through [`SessionRng`], which can be seeded
//!    and replayed in tests.
//!
//! ## Modules
//!
//! - `core`: Card model, ratings, tunable config, errors, RNG
//! - `scheduler`: State transition engine and due-time preview
//! - `queue`: Study queue builder
//!
//! ## Collaborators
//!
//! Persistence, vocabulary capture, and presentation are external. This
//! crate only computes: rate a card, forecast the four outcomes, or select
//! a session's worth of due cards.

pub mod core;
pub mod queue;
pub mod scheduler;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, CardState, Rating,
    QueueLimits, SchedulerConfig,
    SchedulerError,
    SessionRng, SessionRngState,
};

pub use crate::scheduler::{apply_rating, preview, DueForecast};

pub use crate::queue::{build_study_queue, QueueCounts, StudyQueue};
