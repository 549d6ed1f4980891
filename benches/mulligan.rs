use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mulligan_sim::cards::{CardId, Deck};
use mulligan_sim::core::GameRng;
use mulligan_sim::decode::{DeckDecoder, Deckstring};
use mulligan_sim::mulligan::apply_mulligan;

const HUNTER: &str = "AAECAR8GxwPJBLsFmQfZB/gIDI0B2AGoArUDhwSSBe0G6wfbCe0JgQr+DAA=";

fn bench_shuffle(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    let mut cards: Vec<CardId> = (0..30).map(CardId::new).collect();
    c.bench_function("shuffle_30", |b| b.iter(|| rng.shuffle(black_box(&mut cards))));
}

fn bench_mulligan(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    let deck = Deck::from_cards((0..30).map(CardId::new).collect());
    c.bench_function("mulligan_4_of_4", |b| {
        b.iter(|| apply_mulligan(black_box(&deck), false, &[0, 1, 2, 3], &mut rng))
    });
}

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_deckstring", |b| b.iter(|| Deckstring.decode(black_box(HUNTER))));
}

criterion_group!(benches, bench_shuffle, bench_mulligan, bench_decode);
criterion_main!(benches);
