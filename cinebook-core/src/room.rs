use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::{SeatId, EOL, SEATS_PER_ROOM};

/// Outcome of a booking attempt. `Accepted` means every requested seat
/// was booked; anything else means no seat was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    /// All requested seats have been booked.
    Accepted,
    /// At least one requested seat is already booked.
    NotAvailable,
    /// At least one requested seat index is outside `[0, SEATS_PER_ROOM)`.
    Invalid,
}

/// Seat inventory for one (movie, theater) pairing.
///
/// Holds a fixed block of [`SEATS_PER_ROOM`] seats plus a cached listing
/// of the ones still available. A seat goes available to booked at most
/// once; there is no cancellation. Thread safety is provided by the
/// per-room lock in [`BookingStore`](crate::store::BookingStore), which
/// takes it shared for [`available_seats`](Self::available_seats) and
/// exclusive for [`book`](Self::book).
#[derive(Debug)]
pub struct ScreeningRoom {
    available: [bool; SEATS_PER_ROOM],
    listing: Arc<str>,
}

impl ScreeningRoom {
    /// Creates a room with every seat available.
    pub fn new() -> Self {
        let mut room = Self {
            available: [true; SEATS_PER_ROOM],
            listing: Arc::from(""),
        };
        room.rebuild_listing();
        room
    }

    /// Cached listing of available seats: one line of ascending
    /// comma-separated indices, terminated with `\r\n`. A full room
    /// yields just the terminator.
    pub fn available_seats(&self) -> Arc<str> {
        Arc::clone(&self.listing)
    }

    /// Books a set of seats as one atomic transaction.
    ///
    /// Validation runs in two full passes before anything is committed:
    /// first every index is range-checked (`Invalid` on the first
    /// offender), then every index is checked for availability
    /// (`NotAvailable`). A request mixing an out-of-range index with an
    /// already-booked one is therefore always `Invalid`. Only when both
    /// passes succeed are the seats flipped and the listing rebuilt;
    /// partial bookings cannot happen.
    pub fn book(&mut self, seats: &HashSet<SeatId>) -> BookingOutcome {
        if seats.iter().any(|seat| *seat >= SEATS_PER_ROOM) {
            return BookingOutcome::Invalid;
        }
        if seats.iter().any(|seat| !self.available[*seat]) {
            return BookingOutcome::NotAvailable;
        }

        for seat in seats {
            self.available[*seat] = false;
        }

        self.rebuild_listing();
        BookingOutcome::Accepted
    }

    fn rebuild_listing(&mut self) {
        let mut out = String::new();
        let mut first = true;
        for (idx, free) in self.available.iter().enumerate() {
            if *free {
                if first {
                    first = false;
                } else {
                    out.push(',');
                }
                let _ = write!(out, "{idx}");
            }
        }
        out.push_str(EOL);
        self.listing = Arc::from(out);
    }
}

impl Default for ScreeningRoom {
    fn default() -> Self {
        Self::new()
    }
}
