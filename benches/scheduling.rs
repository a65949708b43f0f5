//! Benchmarks for the transition engine and queue builder.
//!
//! Both sit on the session hot path: one transition per rating tap, one
//! queue build per session start over the whole collection.

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use srs_engine::{
    apply_rating, build_study_queue, Card, CardId, CardState, QueueLimits, Rating,
    SchedulerConfig, SessionRng,
};

fn bench_apply_rating(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    let config = SchedulerConfig::default();

    let mut card = Card::new(CardId::new(1), "hund", "dog", now, 2.5);
    card.state = CardState::Review;
    card.interval = 25;

    c.bench_function("apply_rating/review_good", |b| {
        b.iter(|| apply_rating(black_box(&card), Rating::Good, now, &config))
    });
}

fn bench_build_queue(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

    let cards: Vec<Card> = (0..10_000u64)
        .map(|i| {
            let mut card = Card::new(CardId::new(i), format!("word-{i}"), "x", now, 2.5);
            match i % 3 {
                0 => {
                    card.state = CardState::Review;
                    card.interval = 10;
                    card.reviews = 3;
                    card.due = now - Duration::days((i % 50) as i64);
                }
                1 => {
                    card.state = CardState::Learning;
                    card.reviews = 1;
                    card.due = now - Duration::minutes((i % 30) as i64);
                }
                _ => {}
            }
            card
        })
        .collect();

    c.bench_function("build_study_queue/10k_cards", |b| {
        b.iter(|| {
            let mut rng = SessionRng::new(42);
            build_study_queue(black_box(&cards), now, &QueueLimits::default(), &mut rng)
        })
    });
}

criterion_group!(benches, bench_apply_rating, bench_build_queue);
criterion_main!(benches);
