//! User records served by the HTTP API
//!
//! The records are fixed at startup and only ever read, so the repository
//! needs no locking.

use serde::{Deserialize, Serialize};

/// A user record as returned by `/api/user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: String,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
        }
    }
}

/// Read-only lookup of users
pub trait UserRepository: Send + Sync {
    /// Every user, in storage order
    fn all(&self) -> &[User];

    fn find(&self, id: i64) -> Option<&User> {
        self.all().iter().find(|user| user.id == id)
    }
}

/// In-memory repository over a fixed list
#[derive(Debug, Clone, Default)]
pub struct StaticUserRepository {
    users: Vec<User>,
}

impl StaticUserRepository {
    pub const fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The two records the service starts with
    pub fn seeded() -> Self {
        Self::new(vec![
            User::new(1, "First", "admin"),
            User::new(2, "Second", "user"),
        ])
    }
}

impl UserRepository for StaticUserRepository {
    fn all(&self) -> &[User] {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_records() {
        let repo = StaticUserRepository::seeded();
        assert_eq!(
            repo.all(),
            &[User::new(1, "First", "admin"), User::new(2, "Second", "user")]
        );
    }

    #[test]
    fn test_find_by_id() {
        let repo = StaticUserRepository::seeded();
        assert_eq!(repo.find(2).map(|user| user.name.as_str()), Some("Second"));
        assert_eq!(repo.find(3), None);
        assert_eq!(repo.find(-1), None);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(User::new(1, "First", "admin")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "First", "role": "admin"})
        );
    }

    #[test]
    fn test_empty_repository() {
        let repo = StaticUserRepository::default();
        assert!(repo.all().is_empty());
        assert_eq!(repo.find(1), None);
    }
}
