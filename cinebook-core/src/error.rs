/// Catalog-level failures.
///
/// All variants are deterministic outcomes of the current state, never
/// transient. A failing batch operation leaves the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("unknown id: {0}")]
    NotFound(u64),

    #[error("name already exists: {0}")]
    AlreadyExists(String),

    #[error("theater {theater_id} is already showing movie {movie_id}")]
    AlreadyAssociated { movie_id: u64, theater_id: u64 },
}
