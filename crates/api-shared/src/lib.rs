//! # API Shared
//!
//! Shared definitions for the Patientor APIs.
//!
//! Contains:
//! - JSON wire types with OpenAPI schemas (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` for responses and documentation.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
