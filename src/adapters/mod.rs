//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Token verification (JWT, mock)
//! - `clock` - Time sources (system, fixed)
//! - `http` - REST API over axum
//! - `memory` - Lock-guarded in-memory stores for tests and local runs
//! - `postgres` - sqlx-backed persistent stores

pub mod auth;
pub mod clock;
pub mod http;
pub mod memory;
pub mod postgres;
