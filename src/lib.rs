// src/lib.rs
// Filmgraph - Film catalog and social ranking service
//
// Architecture:
// - Domain-centric: entity invariants live next to the entities
// - Layered: repositories are dumb data mappers, services orchestrate
// - Polymorphic storage: SQLite and in-memory behind the same traits
// - HTTP boundary: axum handlers speak DTOs, never domain types

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_film,
    validate_user,
    // Film
    Film,
    FilmRecord,
    // Reference data
    Genre,
    Mpa,
    NewFilm,
    NewUser,
    // User
    User,
    UserRecord,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    AssociationRepository,
    FilmRepository,
    GenreRepository,
    MemoryStore,
    MpaRepository,
    SqliteAssociationRepository,
    SqliteFilmRepository,
    SqliteGenreRepository,
    SqliteMpaRepository,
    SqliteUserRepository,
    UserRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Film Service
    CreateFilmRequest,
    // User Service
    CreateUserRequest,
    FilmService,
    // Reference catalogs
    GenreService,
    MpaService,
    // Ranking
    RankingEngine,
    UpdateFilmRequest,
    UpdateUserRequest,
    UserService,
    DEFAULT_POPULAR_COUNT,
};

// ============================================================================
// PUBLIC API - HTTP Layer
// ============================================================================

pub use api::AppState;

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::{Config, ConfigError, StorageBackend};
