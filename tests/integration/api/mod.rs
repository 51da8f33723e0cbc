//! API integration tests
//!
//! Integration tests for the `/auth/*` and `/health` endpoints

mod auth_test;
