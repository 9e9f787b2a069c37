// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO cross-repository calls
// - Explicit SQL only (SQLite backend)
//
// The memory backend implements every trait on one store object so the
// service layer stays oblivious to which backend is wired in.

pub mod association_repository;
pub mod film_repository;
pub mod genre_repository;
pub mod memory;
pub mod mpa_repository;
pub mod user_repository;

pub use association_repository::{AssociationRepository, SqliteAssociationRepository};
pub use film_repository::{FilmRepository, SqliteFilmRepository};
pub use genre_repository::{GenreRepository, SqliteGenreRepository};
pub use memory::MemoryStore;
pub use mpa_repository::{MpaRepository, SqliteMpaRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
