//! Populates a fresh store with synthetic movies and theaters so the
//! service can be exercised without real catalog data. Not part of the
//! booking service proper; a production deployment would load its
//! catalog through the admin surface instead.

use std::collections::HashSet;

use cinebook_core::{BookingStore, TheaterId};
use tracing::info;

const REAL_TITLES: [&str; 10] = [
    "The Godfather",
    "A night at the opera",
    "Pulp Fiction",
    "Seven Samurai",
    "Terminator 2: Judgment Day",
    "AKIRA",
    "Bilal: A New Breed of Hero",
    "¡Bienvenido Mr. Marshall!",
    "Lucky Baskhar",
    "Fist of Fury",
];

/// Cheap deterministic xorshift. Statistical quality does not matter
/// for fake data, and it keeps large-catalog initialization fast.
struct FastRandom(u32);

impl FastRandom {
    fn new() -> Self {
        Self(0x1234_5678)
    }

    fn next(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0 & 0x7F
    }
}

pub fn populate(store: &BookingStore, movies: usize, theaters: usize) {
    info!(movies, theaters, "seeding synthetic catalog data");

    let mut titles: HashSet<String> = REAL_TITLES.iter().map(|t| t.to_string()).collect();
    titles.extend((0..movies).map(|idx| format!("Movie {idx}")));
    store
        .add_movies(titles)
        .expect("seeding an empty store cannot collide");

    let names: HashSet<String> = (0..theaters).map(|idx| format!("theater {idx}")).collect();
    store
        .add_theaters(names)
        .expect("seeding an empty store cannot collide");

    associate(store);
    info!("seed data ready");
}

/// The first ten movies share a fixed block of theaters so their data is
/// predictable; every other movie gets a sparse random subset (roughly
/// 1 in 128 theaters).
fn associate(store: &BookingStore) {
    let movie_ids = store.sorted_movie_ids();
    let theater_ids = store.sorted_theater_ids();

    let fixed: HashSet<TheaterId> = theater_ids.iter().copied().take(10).collect();
    let mut rng = FastRandom::new();

    for (count, movie_id) in movie_ids.into_iter().enumerate() {
        let selection = if count < 10 {
            fixed.clone()
        } else {
            theater_ids
                .iter()
                .copied()
                .filter(|_| rng.next() == 0)
                .collect()
        };
        store
            .add_theaters_to_movie(movie_id, selection)
            .expect("seed associations are built from registered ids");
    }
}
