// src/api/mod.rs
//
// HTTP surface over the service layer.
//
// Route structure:
//
//   GET    /health                              - Liveness check
//
//   POST   /films                               - Create film
//   PUT    /films                               - Update film (id in body)
//   GET    /films                               - All films
//   GET    /films/popular?count=N               - Top-N films by likes
//   GET    /films/{id}                          - Film by id
//   PUT    /films/{id}/like/{userId}            - Add a like
//   DELETE /films/{id}/like/{userId}            - Remove a like
//
//   POST   /users                               - Create user
//   PUT    /users                               - Update user (id in body)
//   GET    /users                               - All users
//   GET    /users/{id}                          - User by id
//   PUT    /users/{id}/friends/{friendId}       - Befriend (symmetric)
//   DELETE /users/{id}/friends/{friendId}       - Unfriend (symmetric)
//   GET    /users/{id}/friends                  - Friend list
//   GET    /users/{id}/friends/common/{otherId} - Shared friends
//
//   GET    /genres, /genres/{id}                - Genre catalog
//   GET    /mpa, /mpa/{id}                      - MPA rating catalog

pub mod dto;
pub mod error;
pub mod films;
pub mod reference;
pub mod state;
pub mod users;

pub use state::AppState;

use axum::routing::get;
use axum::Router;

/// Create the film routes router.
pub fn film_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(films::index).post(films::create).put(films::update),
        )
        .route("/popular", get(films::popular))
        .route("/{id}", get(films::show))
        .route(
            "/{id}/like/{user_id}",
            axum::routing::put(films::like).delete(films::unlike),
        )
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(users::index).post(users::create).put(users::update),
        )
        .route("/{id}", get(users::show))
        .route("/{id}/friends", get(users::friends))
        .route(
            "/{id}/friends/common/{other_id}",
            get(users::common_friends),
        )
        .route(
            "/{id}/friends/{friend_id}",
            axum::routing::put(users::add_friend).delete(users::remove_friend),
        )
}

/// Create the reference data router for genres and ratings.
pub fn genre_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reference::genre_index))
        .route("/{id}", get(reference::genre_show))
}

pub fn mpa_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reference::mpa_index))
        .route("/{id}", get(reference::mpa_show))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "OK"
}

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/films", film_routes())
        .nest("/users", user_routes())
        .nest("/genres", genre_routes())
        .nest("/mpa", mpa_routes())
        .with_state(state)
}
