//! PostgreSQL adapters.
//!
//! sqlx-backed implementations of the store ports. Atomicity of the
//! reservation and debit primitives comes from per-row conditional
//! updates; no advisory locks or serializable transactions are needed.

mod booking_repository;
mod slot_store;
mod subscription_account;

pub use booking_repository::PostgresBookingRepository;
pub use slot_store::PostgresSlotStore;
pub use subscription_account::PostgresSubscriptionAccount;
