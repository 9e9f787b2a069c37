use chrono::NaiveDate;

/// Scalar user row as stored. Friendship edges live in the association
/// store and are attached by the user service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Store-assigned immutable identifier
    pub id: i64,

    /// Login handle, no whitespace
    pub login: String,

    /// Contact email address
    pub email: String,

    /// Display name; defaults to the login at creation
    pub name: String,

    /// Date of birth, never in the future
    pub birthday: NaiveDate,
}

/// Scalar fields for inserting a user row.
/// The identifier is assigned by the store at insert time; the display
/// name has already been defaulted by the service when this is built.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    pub name: String,
    pub birthday: NaiveDate,
}

/// Fully enriched user: the stored scalars plus friend identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub email: String,
    pub name: String,
    pub birthday: NaiveDate,

    /// Identifiers of users this user has as friends
    pub friends: Vec<i64>,
}

impl User {
    /// Assemble an enriched user from the stored row and its friend ids.
    pub fn from_parts(record: UserRecord, friends: Vec<i64>) -> Self {
        Self {
            id: record.id,
            login: record.login,
            email: record.email,
            name: record.name,
            birthday: record.birthday,
            friends,
        }
    }
}
