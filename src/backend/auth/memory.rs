//! In-memory user store
//!
//! Used when no `DATABASE_URL` is configured and by the test suites. Users
//! live for the lifetime of the process.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::users::{NewUser, StoreError, User, UserStore, EMAIL_TAKEN, USERNAME_TAKEN};

/// User store backed by a map keyed by email
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, User>> {
        // A poisoned map is still consistent: every write is a single insert.
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock().get(email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock().values().find(|user| user.username == username).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.lock();

        if users.contains_key(&user.email) {
            return Err(StoreError::Conflict(EMAIL_TAKEN.to_string()));
        }
        if users.values().any(|existing| existing.username == user.username) {
            return Err(StoreError::Conflict(USERNAME_TAKEN.to_string()));
        }

        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            display_name: user.display_name,
            is_admin: user.is_admin,
            created_at: Utc::now(),
        };
        users.insert(created.email.clone(), created.clone());

        Ok(created)
    }
}
