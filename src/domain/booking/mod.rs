//! Booking domain - claims on slots and the cancellation policy.

mod aggregate;
mod errors;
mod policy;
mod status;

pub use aggregate::{Booking, CancellingActor};
pub use errors::BookingError;
pub use policy::{
    CancellationOutcome, CancellationPolicy, DEFAULT_CANCELLATION_WINDOW_HOURS,
};
pub use status::BookingStatus;
