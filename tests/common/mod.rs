//! Common test utilities and helpers
//!
//! This module provides shared functionality used across integration tests:
//! - Binary path resolution and a command builder with a clean environment
//! - On-disk repository and SDK fixtures

pub(crate) mod helpers;
