pub mod entity;
pub mod invariants;

pub use entity::{NewUser, User, UserRecord};
pub use invariants::validate_user;
