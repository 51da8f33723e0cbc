//! Authentication test helpers
//!
//! Provides utilities for creating test users and tokens directly through
//! the application state, bypassing HTTP.

use brainbridge::backend::auth::password;
use brainbridge::backend::auth::users::{NewUser, User, UserStore};
use brainbridge::backend::AppState;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "test_password_123";

/// Test user credentials
pub struct TestUser {
    pub user: User,
    pub password: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Create a test user in the store and issue it a token pair
pub async fn create_test_user(state: &AppState, username: &str, email: &str, is_admin: bool) -> TestUser {
    let user = state
        .store
        .create(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password::hash(TEST_PASSWORD).expect("hash test password"),
            display_name: username.to_string(),
            is_admin,
        })
        .await
        .expect("create test user");

    let pair = state.tokens.issue_pair(&user.email).expect("issue test tokens");

    TestUser {
        user,
        password: TEST_PASSWORD.to_string(),
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }
}

/// Create a test user with a unique username and email
pub async fn create_unique_test_user(state: &AppState) -> TestUser {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("user_{}", &suffix[..8]);
    let email = format!("{username}@example.com");
    create_test_user(state, &username, &email, false).await
}
