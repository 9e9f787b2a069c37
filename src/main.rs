// src/main.rs
use std::sync::Arc;

use anyhow::Result;

use filmgraph::api::{self, AppState};
use filmgraph::config::{Config, StorageBackend};
use filmgraph::db::{
    create_connection_pool, get_database_stats, initialize_database, verify_database_integrity,
};
use filmgraph::repositories::*;
use filmgraph::services::*;

type Repositories = (
    Arc<dyn FilmRepository>,
    Arc<dyn UserRepository>,
    Arc<dyn GenreRepository>,
    Arc<dyn MpaRepository>,
    Arc<dyn AssociationRepository>,
);

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // 1. CONFIGURATION
    let config = Config::from_env()?;

    // 2. STORAGE BACKEND
    let (film_repo, user_repo, genre_repo, mpa_repo, association_repo) =
        build_repositories(&config)?;

    // 3. SERVICES
    let ranking = Arc::new(RankingEngine::new(
        film_repo.clone(),
        association_repo.clone(),
    ));
    let film_service = Arc::new(FilmService::new(
        film_repo.clone(),
        user_repo.clone(),
        genre_repo.clone(),
        mpa_repo.clone(),
        association_repo.clone(),
        ranking,
    ));
    let user_service = Arc::new(UserService::new(user_repo, association_repo));
    let genre_service = Arc::new(GenreService::new(genre_repo));
    let mpa_service = Arc::new(MpaService::new(mpa_repo));

    // 4. APPLICATION STATE
    let state = AppState {
        film_service,
        user_service,
        genre_service,
        mpa_service,
    };

    // 5. HTTP SERVER
    let app = api::router(state);
    let addr = config.socket_addr();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("filmgraph listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the repository set for the configured backend.
///
/// The SQLite path runs migrations before handing the pool out; the
/// in-memory store ships pre-seeded, so one `Arc` serves all five
/// repository roles.
fn build_repositories(config: &Config) -> Result<Repositories> {
    match config.storage {
        StorageBackend::Sqlite => {
            let pool = Arc::new(create_connection_pool(&config.db_path)?);
            {
                let conn = pool.get()?;
                initialize_database(&conn)?;
                verify_database_integrity(&conn)?;

                let stats = get_database_stats(&conn)?;
                log::info!(
                    "sqlite storage at {} ({} films, {} users)",
                    config.db_path.display(),
                    stats.film_count,
                    stats.user_count
                );
            }

            Ok((
                Arc::new(SqliteFilmRepository::new(pool.clone())),
                Arc::new(SqliteUserRepository::new(pool.clone())),
                Arc::new(SqliteGenreRepository::new(pool.clone())),
                Arc::new(SqliteMpaRepository::new(pool.clone())),
                Arc::new(SqliteAssociationRepository::new(pool)),
            ))
        }
        StorageBackend::Memory => {
            let store = Arc::new(MemoryStore::new());
            log::info!("in-memory storage selected, data will not survive a restart");

            Ok((
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                store,
            ))
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    log::info!("Shutdown signal received, starting graceful shutdown");
}
