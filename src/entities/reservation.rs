// 🛏️ Reservation Entity
// A client, a room category, stay dates, a price and an optional payment method

use crate::entities::person::{Client, Person};
use crate::error::{ReservationError, Result};
use crate::validation::format_date;
use chrono::NaiveDate;
use std::fmt;

// ============================================================================
// ROOM CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomCategory {
    Simple,
    Luxury,
    Premium,
}

impl RoomCategory {
    /// All categories, cheapest first
    pub const ALL: [RoomCategory; 3] = [
        RoomCategory::Simple,
        RoomCategory::Luxury,
        RoomCategory::Premium,
    ];

    /// Name written to the backing file
    pub fn name(&self) -> &'static str {
        match self {
            RoomCategory::Simple => "Simple",
            RoomCategory::Luxury => "Luxury",
            RoomCategory::Premium => "Premium",
        }
    }

    /// Fixed nightly price
    pub fn nightly_price(&self) -> f64 {
        match self {
            RoomCategory::Simple => 150.0,
            RoomCategory::Luxury => 300.0,
            RoomCategory::Premium => 450.0,
        }
    }

    /// Parse a stored category name
    ///
    /// Also accepts the older spellings (Simples/Luxo, Medium/Large).
    pub fn from_name(text: &str) -> Option<RoomCategory> {
        match text.trim().to_lowercase().as_str() {
            "simple" | "simples" => Some(RoomCategory::Simple),
            "luxury" | "luxo" | "medium" => Some(RoomCategory::Luxury),
            "premium" | "large" => Some(RoomCategory::Premium),
            _ => None,
        }
    }

    /// Exclusive choice from the form; nothing chosen is an error
    pub fn select(choice: Option<RoomCategory>) -> Result<RoomCategory> {
        choice.ok_or(ReservationError::NoSelection)
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// RESERVATION
// ============================================================================

/// One booking
///
/// Dates and price are taken as given: check-out before check-in and
/// negative prices are not rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    client: Client,
    room_category: RoomCategory,
    check_in: NaiveDate,
    check_out: NaiveDate,
    price: f64,
    payment: Option<String>,
}

/// Assemble a reservation from already-validated parts
pub fn build_reservation(
    client: Client,
    room_category: RoomCategory,
    check_in: NaiveDate,
    check_out: NaiveDate,
    price: f64,
    payment: Option<String>,
) -> Reservation {
    Reservation {
        client,
        room_category,
        check_in,
        check_out,
        price,
        payment,
    }
}

impl Reservation {
    /// Override the price (e.g. a negotiated rate)
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn room_category(&self) -> RoomCategory {
        self.room_category
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn payment(&self) -> Option<&str> {
        self.payment.as_deref()
    }

    /// Detail block shown on confirmation and in the admin listing
    pub fn describe(&self) -> String {
        let mut text = self.client.describe();
        text.push_str(&format!("\nRoom type: {}", self.room_category));
        text.push_str(&format!("\nCheck-in: {}", format_date(self.check_in)));
        text.push_str(&format!("\nCheck-out: {}", format_date(self.check_out)));
        text.push_str(&format!("\nPrice: R$ {:.2}", self.price));
        if let Some(payment) = &self.payment {
            text.push_str(&format!("\nPayment: {}", payment));
        }
        text.push_str("\n--------");
        text
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// ============================================================================
// TESTS
// ============================================================================
