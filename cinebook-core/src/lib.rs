pub mod error;
pub mod registry;
pub mod room;
pub mod store;

pub use error::StoreError;
pub use registry::IdRegistry;
pub use room::{BookingOutcome, ScreeningRoom};
pub use store::BookingStore;

/// Unique identifier of a movie.
pub type MovieId = u64;

/// Unique identifier of a theater.
pub type TheaterId = u64;

/// Zero-based seat index inside a screening room.
pub type SeatId = usize;

/// Number of seats in every screening room.
pub const SEATS_PER_ROOM: usize = 20;

/// Line terminator used by every textual listing.
pub const EOL: &str = "\r\n";
