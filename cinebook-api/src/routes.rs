//! Public query/booking surface: `/api/{command}` with the text
//! protocol bodies, statuses chosen here so the store never sees HTTP.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use cinebook_core::{BookingOutcome, BookingStore, EOL};
use tracing::debug;

use crate::request::{self, Command};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/{command}", get(dispatch))
}

async fn dispatch(State(state): State<AppState>, Path(raw): Path<String>) -> impl IntoResponse {
    match request::parse(&raw) {
        Some(command) => execute(&state.store, command),
        None => {
            debug!(command = %raw, "unparseable command");
            (StatusCode::BAD_REQUEST, format!("Invalid request{EOL}"))
        }
    }
}

fn execute(store: &BookingStore, command: Command) -> (StatusCode, String) {
    match command {
        Command::ListMovies => (StatusCode::OK, store.movies().to_string()),

        Command::ListTheaters { movie_id } => match store.theaters_for_movie(movie_id) {
            Ok(listing) => (StatusCode::OK, listing.to_string()),
            Err(_) => (StatusCode::NOT_FOUND, format!("Invalid movieid{EOL}")),
        },

        Command::ListSeats {
            movie_id,
            theater_id,
        } => match store.available_seats(movie_id, theater_id) {
            Ok(listing) => (StatusCode::OK, listing.to_string()),
            Err(_) => (
                StatusCode::NOT_FOUND,
                format!("Invalid combination of movieid and theaterid{EOL}"),
            ),
        },

        Command::Book {
            movie_id,
            theater_id,
            seats,
        } => match store.book(movie_id, theater_id, &seats) {
            Ok(BookingOutcome::Accepted) => (StatusCode::OK, format!("Booking OK{EOL}")),
            Ok(BookingOutcome::NotAvailable) => {
                (StatusCode::FORBIDDEN, format!("Seats not available{EOL}"))
            }
            Ok(BookingOutcome::Invalid) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid movieid, theaterid or seatnumbers{EOL}"),
            ),
            Err(_) => (
                StatusCode::NOT_FOUND,
                format!("Invalid movieid, theaterid or seatnumbers{EOL}"),
            ),
        },
    }
}
