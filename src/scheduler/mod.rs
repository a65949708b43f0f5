//! The scheduling algorithm: rating transitions and due-time previews.
//!
//! ## Key Operations
//!
//! - [`apply_rating`]: pure (card, rating, now) → new card snapshot
//! - [`preview`]: forecast all four rating outcomes without committing
//!
//! Both operate on copies; the caller's card is never mutated.

pub mod preview;
pub mod transition;

pub use preview::{preview, DueForecast};
pub use transition::apply_rating;
