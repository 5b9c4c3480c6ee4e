// Hotel Reservations - Core Library
// Validation, models and the reservation file store used by the TUI shell

pub mod booking;
pub mod config;
pub mod entities;
pub mod error;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use booking::{list_reservations, submit_reservation, submit_reservation_on, BookingForm};
pub use config::AppConfig;
pub use entities::{
    build_reservation, Client, Employee, NationalId, Person, Reservation, RoomCategory,
};
pub use error::{ErrorKind, ReservationError};
pub use store::ReservationStore;
pub use validation::{parse_date, validate_national_id};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
