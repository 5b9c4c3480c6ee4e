// Entity Models
//
// People (client, employee) and the reservation that ties a client to a room
// for a stay.

pub mod person;
pub mod reservation;

pub use person::{Client, Employee, NationalId, Person};
pub use reservation::{build_reservation, Reservation, RoomCategory};
