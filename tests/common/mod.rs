//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Application state and server fixtures
//! - Authentication test helpers

pub mod auth_helpers;

pub use auth_helpers::*;
pub use server::*;
