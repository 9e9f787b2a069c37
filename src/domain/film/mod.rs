pub mod entity;
pub mod invariants;

pub use entity::{Film, FilmRecord, NewFilm};
pub use invariants::validate_film;
