use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                   // unique user ID
    pub username: String,           // unique, immutable after creation
    #[serde(skip_serializing)]
    pub password_hash: String,      // argon2 hash, not exposed in JSON
    pub role: UserRole,
    pub is_active: bool,
    pub country: String,
    pub created_at: OffsetDateTime, // creation timestamp
}

impl User {
    /// Build a fresh account record: USER role, active, timestamped now.
    pub fn new(username: &str, password_hash: String, country: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
            role: UserRole::User,
            is_active: true,
            country: country.to_string(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_default_role_and_active_flag() {
        let user = User::new("alice", "hash".into(), "BG");
        assert_eq!(user.role, UserRole::User);
        assert!(user.is_active);
        assert_eq!(user.username, "alice");
        assert_eq!(user.country, "BG");
    }

    #[test]
    fn new_users_get_distinct_ids() {
        let a = User::new("alice", "hash".into(), "BG");
        let b = User::new("bob", "hash".into(), "US");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User::new("alice", "super-secret-hash".into(), "BG");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("super-secret-hash"));
        assert!(json.contains("alice"));
    }

    #[test]
    fn role_serializes_in_storage_spelling() {
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"USER\"");
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
    }
}
