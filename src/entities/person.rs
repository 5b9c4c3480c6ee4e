// 🧑 Person Entities - Client and Employee
//
// Both share a name and a national ID (CPF) and can describe themselves for
// display. Identity key is the national ID.

use crate::validation::format_date;
use chrono::NaiveDate;
use std::fmt;

// ============================================================================
// NATIONAL ID
// ============================================================================

/// CPF that already passed `validate_national_id`
///
/// Only the validator constructs this, so holding one means the 11-digit
/// format rule was checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NationalId(String);

impl NationalId {
    pub(crate) fn from_validated(digits: String) -> Self {
        NationalId(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// PERSON
// ============================================================================

/// Anything with a name and a CPF that can be shown on screen
pub trait Person {
    fn name(&self) -> &str;

    fn national_id(&self) -> &NationalId;

    /// Multi-line, human-readable detail block
    fn describe(&self) -> String;
}

// ============================================================================
// CLIENT
// ============================================================================

/// Hotel guest
///
/// Only name and national ID are persisted with a reservation; birthdate and
/// contact details appear on the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    name: String,
    national_id: NationalId,
    birthdate: Option<NaiveDate>,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
}

impl Client {
    pub fn new(name: String, national_id: NationalId) -> Self {
        Client {
            name,
            national_id,
            birthdate: None,
            address: None,
            phone: None,
            email: None,
        }
    }

    /// Builder pattern: add birthdate
    pub fn with_birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    /// Builder pattern: add address
    pub fn with_address(mut self, address: String) -> Self {
        self.address = Some(address);
        self
    }

    /// Builder pattern: add phone
    pub fn with_phone(mut self, phone: String) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Builder pattern: add email
    pub fn with_email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn birthdate(&self) -> Option<NaiveDate> {
        self.birthdate
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl Person for Client {
    fn name(&self) -> &str {
        &self.name
    }

    fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    fn describe(&self) -> String {
        let mut lines = vec![
            format!("Name: {}", self.name),
            format!("CPF: {}", self.national_id),
        ];

        if let Some(birthdate) = self.birthdate {
            lines.push(format!("Birthdate: {}", format_date(birthdate)));
        }
        if let Some(address) = &self.address {
            lines.push(format!("Address: {}", address));
        }
        if let Some(phone) = &self.phone {
            lines.push(format!("Phone: {}", phone));
        }
        if let Some(email) = &self.email {
            lines.push(format!("Email: {}", email));
        }

        lines.join("\n")
    }
}

// ============================================================================
// EMPLOYEE
// ============================================================================

/// Hotel staff member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    name: String,
    national_id: NationalId,
    role: String,
}

impl Employee {
    pub fn new(name: String, national_id: NationalId, role: String) -> Self {
        Employee {
            name,
            national_id,
            role,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

impl Person for Employee {
    fn name(&self) -> &str {
        &self.name
    }

    fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    fn describe(&self) -> String {
        format!(
            "Name: {}\nCPF: {}\nRole: {}",
            self.name, self.national_id, self.role
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
