// Reservation errors - one enum for the whole core
// Every variant carries a message that can be shown to the guest as-is

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReservationError {
    /// National ID is not exactly 11 digits
    #[error("{0}")]
    InvalidFormat(String),

    /// No room category was chosen on the form
    #[error("Select a room type.")]
    NoSelection,

    /// A date field is not in dd/mm/yyyy form
    #[error("Invalid {field} date '{value}' (expected dd/mm/yyyy)")]
    InvalidDate { field: String, value: String },

    /// Backing file could not be opened, written or read
    #[error("Reservation file error: {0}")]
    IoFailure(#[from] io::Error),

    /// Price column on a stored line is not a number
    #[error("Corrupt price '{value}' on line {line}")]
    ParseFailure { line: u64, value: String },

    /// Stored line that cannot be turned into a reservation
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
}

/// Fieldless view of [`ReservationError`] for matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidFormat,
    NoSelection,
    InvalidDate,
    IoFailure,
    ParseFailure,
    MalformedRecord,
}

impl ReservationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReservationError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            ReservationError::NoSelection => ErrorKind::NoSelection,
            ReservationError::InvalidDate { .. } => ErrorKind::InvalidDate,
            ReservationError::IoFailure(_) => ErrorKind::IoFailure,
            ReservationError::ParseFailure { .. } => ErrorKind::ParseFailure,
            ReservationError::MalformedRecord { .. } => ErrorKind::MalformedRecord,
        }
    }
}

// csv wraps io errors (and utf-8 errors) in its own type
impl From<csv::Error> for ReservationError {
    fn from(err: csv::Error) -> Self {
        ReservationError::IoFailure(io::Error::from(err))
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_displayable() {
        let err = ReservationError::InvalidFormat("Invalid CPF!".to_string());
        assert_eq!(err.to_string(), "Invalid CPF!");
        assert_eq!(ReservationError::NoSelection.to_string(), "Select a room type.");

        let err = ReservationError::ParseFailure {
            line: 3,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Corrupt price 'abc' on line 3");
    }

    #[test]
    fn test_kind_mapping() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(ReservationError::from(io_err).kind(), ErrorKind::IoFailure);
        assert_eq!(ReservationError::NoSelection.kind(), ErrorKind::NoSelection);

        let err = ReservationError::InvalidDate {
            field: "check-in".to_string(),
            value: "31/02".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidDate);
    }
}
