use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                   // unique user ID, fresh per insert
    pub name: String,               // display name
    pub email: String,              // unique, stored trimmed and lowercased
    #[serde(skip_serializing)]
    pub password: String,           // Argon2 hash, not exposed in JSON
    pub created_at: OffsetDateTime, // set once at insert
    pub updated_at: OffsetDateTime, // refreshed on every mutation
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn password_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password: "$argon2id$v=19$secret".into(),
            created_at: datetime!(2026-01-01 00:00 UTC),
            updated_at: datetime!(2026-01-01 00:00 UTC),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("secret"));
        assert!(json.contains("ana@x.com"));
    }
}
