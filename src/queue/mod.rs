//! Study queue construction.
//!
//! Once per session start, the presentation layer hands the full card
//! collection to [`build_study_queue`] and gets back three independently
//! addressable sequences: learning, review, and new. Convention is to
//! drain them in that order, but the builder does not enforce it.

pub mod builder;

pub use builder::{build_study_queue, QueueCounts, StudyQueue};
