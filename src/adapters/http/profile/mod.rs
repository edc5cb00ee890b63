//! HTTP adapter for the profile endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{ProfileResponse, ProfileUserDto};
pub use handlers::ProfileAppState;
pub use routes::profile_routes;
