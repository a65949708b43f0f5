//! Study queue builder.
//!
//! Partitions a card collection into the three buckets actionable right
//! now:
//!
//! - **learning**: `Learning`/`Relearning` cards due at or before `now`,
//!   sorted by due, uncapped. Short-horizon commitments are never dropped.
//! - **review**: `Review` cards due at or before `now`, sorted by due,
//!   capped.
//! - **new**: never-rated `New` cards, shuffled via the injected RNG,
//!   capped.
//!
//! Cards that are not due, or anomalously `New` with a review history,
//! are omitted without error; skipping a card for one session is a safe,
//! non-destructive default.

use chrono::{DateTime, Utc};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::core::{Card, CardState, QueueLimits, SessionRng};

/// One session's worth of due cards.
///
/// Holds snapshots, not references; the caller's collection stays
/// untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudyQueue {
    /// Never-rated cards, shuffled, capped.
    pub new: Vec<Card>,

    /// Learning and relearning cards due now, ascending by due, uncapped.
    pub learning: Vec<Card>,

    /// Review cards due now, ascending by due, capped.
    pub review: Vec<Card>,
}

impl StudyQueue {
    /// Sizes of the three sequences as actually returned.
    ///
    /// New and review reflect their caps; learning is the full count.
    #[must_use]
    pub fn counts(&self) -> QueueCounts {
        QueueCounts {
            new: self.new.len(),
            learning: self.learning.len(),
            review: self.review.len(),
        }
    }

    /// Is there anything to study?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.learning.is_empty() && self.review.is_empty()
    }
}

/// Per-bucket sizes of a built queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCounts {
    /// New cards returned (post-cap).
    pub new: usize,
    /// Learning cards returned (uncapped).
    pub learning: usize,
    /// Review cards returned (post-cap).
    pub review: usize,
}

impl QueueCounts {
    /// Total cards in the session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.new + self.learning + self.review
    }
}

/// Build the study queue for one session.
///
/// Sorts are stable with ties broken by card id, so two callers building
/// from the same collection and `now` agree on learning/review order.
/// The new-card order comes entirely from `rng`; seed it to reproduce a
/// session.
#[must_use]
pub fn build_study_queue(
    cards: &[Card],
    now: DateTime<Utc>,
    limits: &QueueLimits,
    rng: &mut SessionRng,
) -> StudyQueue {
    let mut new = Vec::new();
    let mut learning = Vec::new();
    let mut review = Vec::new();

    for card in cards {
        match card.state {
            CardState::New if card.reviews == 0 => new.push(card.clone()),
            CardState::New => {
                // A "new" card with history is corrupt; defer it rather
                // than guess a bucket.
                trace!("skipping {}: state new but {} reviews", card.id, card.reviews);
            }
            CardState::Learning | CardState::Relearning if card.is_due(now) => {
                learning.push(card.clone());
            }
            CardState::Review if card.is_due(now) => review.push(card.clone()),
            _ => trace!("skipping {}: not due until {}", card.id, card.due),
        }
    }

    learning.sort_by_key(|card| (card.due, card.id));
    review.sort_by_key(|card| (card.due, card.id));

    rng.shuffle(&mut new);
    new.truncate(limits.new_limit);
    review.truncate(limits.review_limit);

    let queue = StudyQueue { new, learning, review };
    let counts = queue.counts();
    debug!(
        "built study queue from {} cards: {} new, {} learning, {} review",
        cards.len(),
        counts.new,
        counts.learning,
        counts.review
    );

    queue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn card(id: u64, state: CardState, due: DateTime<Utc>) -> Card {
        let mut card = Card::new(CardId::new(id), format!("word-{id}"), "x", now(), 2.5);
        card.state = state;
        card.due = due;
        if state != CardState::New {
            card.reviews = 1;
        }
        card
    }

    #[test]
    fn test_empty_collection() {
        let mut rng = SessionRng::new(1);
        let queue = build_study_queue(&[], now(), &QueueLimits::default(), &mut rng);

        assert!(queue.is_empty());
        assert_eq!(queue.counts(), QueueCounts::default());
        assert_eq!(queue.counts().total(), 0);
    }

    #[test]
    fn test_partition_by_state() {
        let cards = vec![
            card(1, CardState::New, now()),
            card(2, CardState::Learning, now() - Duration::minutes(1)),
            card(3, CardState::Relearning, now() - Duration::minutes(2)),
            card(4, CardState::Review, now() - Duration::days(1)),
        ];
        let mut rng = SessionRng::new(1);
        let queue = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng);

        assert_eq!(queue.counts(), QueueCounts { new: 1, learning: 2, review: 1 });
        assert_eq!(queue.new[0].id, CardId::new(1));
        assert_eq!(queue.review[0].id, CardId::new(4));
    }

    #[test]
    fn test_not_due_cards_excluded() {
        let cards = vec![
            card(1, CardState::Learning, now() + Duration::minutes(5)),
            card(2, CardState::Review, now() + Duration::days(1)),
        ];
        let mut rng = SessionRng::new(1);
        let queue = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng);

        assert!(queue.is_empty());
    }

    #[test]
    fn test_due_exactly_now_is_included() {
        let cards = vec![card(1, CardState::Review, now())];
        let mut rng = SessionRng::new(1);
        let queue = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng);

        assert_eq!(queue.review.len(), 1);
    }

    #[test]
    fn test_new_card_with_history_excluded() {
        let mut anomaly = card(1, CardState::New, now());
        anomaly.reviews = 3;

        let mut rng = SessionRng::new(1);
        let queue = build_study_queue(&[anomaly], now(), &QueueLimits::default(), &mut rng);

        assert!(queue.is_empty());
    }

    #[test]
    fn test_learning_sorted_by_due() {
        let cards = vec![
            card(1, CardState::Learning, now() - Duration::minutes(1)),
            card(2, CardState::Learning, now() - Duration::minutes(30)),
            card(3, CardState::Relearning, now() - Duration::minutes(10)),
        ];
        let mut rng = SessionRng::new(1);
        let queue = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng);

        let order: Vec<_> = queue.learning.iter().map(|c| c.id.raw()).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_due_ties_broken_by_id() {
        let due = now() - Duration::days(1);
        let cards = vec![
            card(9, CardState::Review, due),
            card(3, CardState::Review, due),
            card(7, CardState::Review, due),
        ];
        let mut rng = SessionRng::new(1);
        let queue = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng);

        let order: Vec<_> = queue.review.iter().map(|c| c.id.raw()).collect();
        assert_eq!(order, vec![3, 7, 9]);
    }

    #[test]
    fn test_new_cap_applied() {
        let cards: Vec<_> = (0..50).map(|i| card(i, CardState::New, now())).collect();
        let mut rng = SessionRng::new(1);
        let queue = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng);

        assert_eq!(queue.new.len(), 20);
        assert_eq!(queue.counts().new, 20);
    }

    #[test]
    fn test_learning_is_uncapped() {
        let cards: Vec<_> = (0..300)
            .map(|i| card(i, CardState::Learning, now() - Duration::minutes(1)))
            .collect();
        let mut rng = SessionRng::new(1);
        let queue = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng);

        assert_eq!(queue.learning.len(), 300);
    }

    #[test]
    fn test_new_shuffle_is_seeded() {
        let cards: Vec<_> = (0..30).map(|i| card(i, CardState::New, now())).collect();

        let mut rng_a = SessionRng::new(42);
        let mut rng_b = SessionRng::new(42);
        let a = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng_a);
        let b = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng_b);

        assert_eq!(a, b);

        let mut rng_c = SessionRng::new(7);
        let c = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng_c);
        let ids = |q: &StudyQueue| q.new.iter().map(|x| x.id.raw()).collect::<Vec<_>>();
        assert_ne!(ids(&a), ids(&c));
    }

    #[test]
    fn test_input_collection_untouched() {
        let cards = vec![card(1, CardState::Review, now() - Duration::days(1))];
        let before = cards.clone();

        let mut rng = SessionRng::new(1);
        let _ = build_study_queue(&cards, now(), &QueueLimits::default(), &mut rng);

        assert_eq!(cards, before);
    }
}
