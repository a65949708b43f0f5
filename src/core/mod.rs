//! Core scheduling types: cards, ratings, configuration, errors, RNG.
//!
//! This module contains the data model the scheduler operates on. Callers
//! tune behavior via `SchedulerConfig` rather than modifying the core.

pub mod card;
pub mod config;
pub mod error;
pub mod rng;

pub use card::{Card, CardId, CardState, Rating};
pub use config::{QueueLimits, SchedulerConfig};
pub use error::SchedulerError;
pub use rng::{SessionRng, SessionRngState};
