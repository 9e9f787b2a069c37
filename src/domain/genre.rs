// src/domain/genre.rs

/// Descriptive tag attachable to films, many-to-many.
/// Reference data: read-only, seeded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}
