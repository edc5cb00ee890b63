//! Ringside - Booking and Subscription Ledger
//!
//! This crate implements the slot booking engine for a single-trainer
//! training studio: atomic slot reservation, prepaid session accounting,
//! and role-aware cancellation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
