// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations and reference-data seeding
// - Database utilities

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_test_connection, create_test_pool, get_connection,
    ConnectionPool, PooledConn,
};

pub use migrations::{
    get_database_stats, initialize_database, verify_database_integrity, DatabaseStats,
};
