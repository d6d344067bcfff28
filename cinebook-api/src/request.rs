//! Parser for the underscore-separated command grammar of the public
//! API paths: `listmovies`, `listtheaters_<movie>`,
//! `listseats_<movie>_<theater>` and
//! `book_<movie>_<theater>_<seat>[_<seat>...]`.

use std::collections::HashSet;

use cinebook_core::{MovieId, SeatId, TheaterId, SEATS_PER_ROOM};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListMovies,
    ListTheaters {
        movie_id: MovieId,
    },
    ListSeats {
        movie_id: MovieId,
        theater_id: TheaterId,
    },
    Book {
        movie_id: MovieId,
        theater_id: TheaterId,
        seats: HashSet<SeatId>,
    },
}

/// Parses the command segment of an `/api/{command}` path. Returns
/// `None` for anything that does not match the grammar exactly,
/// including duplicate seat numbers and book requests asking for more
/// seats than a room holds.
pub fn parse(raw: &str) -> Option<Command> {
    if raw == "listmovies" {
        return Some(Command::ListMovies);
    }

    let (kind, args) = raw.split_once('_')?;
    match kind {
        "listtheaters" => {
            let movie_id = number(args)?;
            Some(Command::ListTheaters { movie_id })
        }
        "listseats" => {
            let (movie, theater) = args.split_once('_')?;
            Some(Command::ListSeats {
                movie_id: number(movie)?,
                theater_id: number(theater)?,
            })
        }
        "book" => parse_book(args),
        _ => None,
    }
}

fn parse_book(args: &str) -> Option<Command> {
    let mut fields = args.split('_');
    let movie_id = number(fields.next()?)?;
    let theater_id = number(fields.next()?)?;

    let mut seats = HashSet::new();
    for field in fields {
        let seat = SeatId::try_from(number(field)?).ok()?;
        if !seats.insert(seat) {
            // Booking the same seat twice in one request is a client bug.
            return None;
        }
    }
    if seats.is_empty() || seats.len() > SEATS_PER_ROOM {
        return None;
    }

    Some(Command::Book {
        movie_id,
        theater_id,
        seats,
    })
}

/// Strict decimal parse: digits only, no sign, no surrounding junk.
fn number(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
