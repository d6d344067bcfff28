use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::error::StoreError;
use crate::registry::IdRegistry;
use crate::room::{BookingOutcome, ScreeningRoom};
use crate::{MovieId, SeatId, TheaterId, EOL};

type RoomHandle = Arc<RwLock<ScreeningRoom>>;

/// Everything guarded by the outer catalog lock.
#[derive(Debug, Default)]
struct Catalog {
    movies: IdRegistry,
    theaters: IdRegistry,
    rooms: HashMap<MovieId, BTreeMap<TheaterId, RoomHandle>>,
    theaters_by_movie: HashMap<MovieId, Arc<str>>,
}

impl Catalog {
    fn room(&self, movie_id: MovieId, theater_id: TheaterId) -> Result<&RoomHandle, StoreError> {
        let rooms = self
            .rooms
            .get(&movie_id)
            .ok_or(StoreError::NotFound(movie_id))?;
        rooms
            .get(&theater_id)
            .ok_or(StoreError::NotFound(theater_id))
    }

    fn rebuild_theater_listing(&mut self, movie_id: MovieId) {
        let mut out = String::new();
        if let Some(rooms) = self.rooms.get(&movie_id) {
            for theater_id in rooms.keys() {
                // Theater ids were validated against the registry when
                // the room was created.
                if let Ok(name) = self.theaters.name(*theater_id) {
                    let _ = write!(out, "{theater_id},{name}{EOL}");
                }
            }
        }
        self.theaters_by_movie.insert(movie_id, Arc::from(out));
    }
}

/// The concurrent catalog/inventory store: movie and theater registries,
/// one [`ScreeningRoom`] per (movie, theater) pairing, and the cached
/// listings that make reads cheap.
///
/// Two lock tiers, always taken outer to inner:
///
/// - the catalog lock, shared for every read *and* for a booking's room
///   lookup (booking never changes catalog structure), exclusive for
///   `add_movies`, `add_theaters`, `add_theaters_to_movie` and `clear`;
/// - one lock per room, shared for its seat listing, exclusive for
///   booking into it.
///
/// So any number of reads run concurrently with each other and with
/// bookings, bookings against different rooms run fully in parallel, and
/// bookings against the same room serialize on that room's lock. Cached
/// listings are immutable `Arc<str>` values swapped under the exclusive
/// lock; readers receive a refcount clone, never a copy.
///
/// Share the store between threads via `Arc<BookingStore>`; it holds no
/// external resources, so `clear` is the only teardown it needs.
#[derive(Debug, Default)]
pub struct BookingStore {
    inner: RwLock<Catalog>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached movie listing, one `id,title` line per movie.
    pub fn movies(&self) -> Arc<str> {
        self.read().movies.listing()
    }

    /// Ascending movie ids. Uncached, costs O(movies).
    pub fn sorted_movie_ids(&self) -> Vec<MovieId> {
        self.read().movies.sorted_ids()
    }

    /// Ascending theater ids. Uncached, costs O(theaters).
    pub fn sorted_theater_ids(&self) -> Vec<TheaterId> {
        self.read().theaters.sorted_ids()
    }

    /// Cached listing of the theaters showing `movie_id`, one
    /// `id,name` line per theater.
    pub fn theaters_for_movie(&self, movie_id: MovieId) -> Result<Arc<str>, StoreError> {
        self.read()
            .theaters_by_movie
            .get(&movie_id)
            .cloned()
            .ok_or(StoreError::NotFound(movie_id))
    }

    /// Cached listing of the seats still available for the pairing.
    pub fn available_seats(
        &self,
        movie_id: MovieId,
        theater_id: TheaterId,
    ) -> Result<Arc<str>, StoreError> {
        let catalog = self.read();
        let room = catalog.room(movie_id, theater_id)?;
        let listing = read_room(room).available_seats();
        Ok(listing)
    }

    /// Books `seats` for the pairing as one atomic transaction.
    ///
    /// Takes the catalog lock shared (a booking never changes catalog
    /// structure) and the room lock exclusive. The shared catalog hold
    /// is kept across the room write so `clear` cannot discard the room
    /// while the booking commits.
    pub fn book(
        &self,
        movie_id: MovieId,
        theater_id: TheaterId,
        seats: &HashSet<SeatId>,
    ) -> Result<BookingOutcome, StoreError> {
        let catalog = self.read();
        let room = catalog.room(movie_id, theater_id)?;
        let outcome = write_room(room).book(seats);
        debug!(movie_id, theater_id, ?outcome, "booking attempt");
        Ok(outcome)
    }

    /// Registers a batch of movie titles. All-or-nothing: a duplicate
    /// title rejects the whole batch with `AlreadyExists`.
    pub fn add_movies(&self, titles: HashSet<String>) -> Result<Vec<MovieId>, StoreError> {
        let mut catalog = self.write();
        let ids = catalog.movies.add(titles)?;
        for movie_id in &ids {
            catalog.rooms.insert(*movie_id, BTreeMap::new());
            catalog.rebuild_theater_listing(*movie_id);
        }
        info!(count = ids.len(), "movies registered");
        Ok(ids)
    }

    /// Registers a batch of theater names, with the same all-or-nothing
    /// guarantee as [`add_movies`](Self::add_movies).
    pub fn add_theaters(&self, names: HashSet<String>) -> Result<Vec<TheaterId>, StoreError> {
        let mut catalog = self.write();
        let ids = catalog.theaters.add(names)?;
        info!(count = ids.len(), "theaters registered");
        Ok(ids)
    }

    /// Associates theaters with a movie, creating one fully-available
    /// room per theater.
    ///
    /// All-or-nothing: an unknown movie or theater id fails with
    /// `NotFound`, a theater already showing the movie fails with
    /// `AlreadyAssociated`, and in both cases nothing is changed.
    pub fn add_theaters_to_movie(
        &self,
        movie_id: MovieId,
        theater_ids: HashSet<TheaterId>,
    ) -> Result<(), StoreError> {
        let mut catalog = self.write();
        if !catalog.movies.has(movie_id) {
            return Err(StoreError::NotFound(movie_id));
        }
        for theater_id in &theater_ids {
            if !catalog.theaters.has(*theater_id) {
                return Err(StoreError::NotFound(*theater_id));
            }
        }
        if let Some(rooms) = catalog.rooms.get(&movie_id) {
            for theater_id in &theater_ids {
                if rooms.contains_key(theater_id) {
                    return Err(StoreError::AlreadyAssociated {
                        movie_id,
                        theater_id: *theater_id,
                    });
                }
            }
        }

        let rooms = catalog.rooms.entry(movie_id).or_default();
        for theater_id in &theater_ids {
            rooms.insert(*theater_id, Arc::new(RwLock::new(ScreeningRoom::new())));
        }
        catalog.rebuild_theater_listing(movie_id);
        debug!(movie_id, count = theater_ids.len(), "theaters associated");
        Ok(())
    }

    /// Drops every movie, theater, room and cache. Id assignment
    /// restarts at 1.
    pub fn clear(&self) {
        let mut catalog = self.write();
        catalog.movies.clear();
        catalog.theaters.clear();
        catalog.rooms.clear();
        catalog.theaters_by_movie.clear();
        info!("store cleared");
    }

    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        // The store never panics while holding its locks, so a poisoned
        // lock still guards consistent state.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_room(room: &RoomHandle) -> RwLockReadGuard<'_, ScreeningRoom> {
    room.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_room(room: &RoomHandle) -> RwLockWriteGuard<'_, ScreeningRoom> {
    room.write().unwrap_or_else(PoisonError::into_inner)
}
