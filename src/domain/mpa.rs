// src/domain/mpa.rs

/// Motion Picture Association content rating, exactly one per film.
/// Reference data: read-only, seeded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mpa {
    pub id: i64,
    pub name: String,
    pub description: String,
}
