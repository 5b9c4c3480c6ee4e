// 📝 Booking - the boundary the UI shell talks to
//
// The form hands over raw field text; this module validates it, builds the
// client and reservation, and asks the store to persist them.

use crate::entities::{build_reservation, Client, Reservation, RoomCategory};
use crate::error::Result;
use crate::store::ReservationStore;
use crate::validation::{parse_date, validate_national_id};
use chrono::{Duration, Local, NaiveDate};
use tracing::debug;

pub const EMPTY_LISTING: &str = "No reservations found.";

/// Raw values collected by the booking form
///
/// Empty text means "not filled in".
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub name: String,
    pub national_id: String,
    pub birthdate: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// dd/mm/yyyy, defaults to today
    pub check_in: String,
    /// dd/mm/yyyy, defaults to the day after check-in
    pub check_out: String,
    pub room_category: Option<RoomCategory>,
    /// Overrides the category's nightly price
    pub price: Option<f64>,
    pub payment: String,
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validate the form and append the reservation to the store
///
/// Nothing is written unless every check passes.
pub fn submit_reservation(store: &mut ReservationStore, form: &BookingForm) -> Result<Reservation> {
    submit_reservation_on(store, form, Local::now().date_naive())
}

/// Same as `submit_reservation` with an explicit "today" for default dates
pub fn submit_reservation_on(
    store: &mut ReservationStore,
    form: &BookingForm,
    today: NaiveDate,
) -> Result<Reservation> {
    let reservation = prepare_reservation(form, today).map_err(|err| {
        debug!("Booking rejected: {}", err);
        err
    })?;

    store.append(reservation.clone())?;
    Ok(reservation)
}

fn prepare_reservation(form: &BookingForm, today: NaiveDate) -> Result<Reservation> {
    let national_id = validate_national_id(form.national_id.trim())?;
    let room_category = RoomCategory::select(form.room_category)?;

    let mut client = Client::new(form.name.trim().to_string(), national_id);
    if let Some(birthdate) = non_empty(&form.birthdate) {
        client = client.with_birthdate(parse_date("birthdate", &birthdate)?);
    }
    if let Some(address) = non_empty(&form.address) {
        client = client.with_address(address);
    }
    if let Some(phone) = non_empty(&form.phone) {
        client = client.with_phone(phone);
    }
    if let Some(email) = non_empty(&form.email) {
        client = client.with_email(email);
    }

    let check_in = match non_empty(&form.check_in) {
        Some(text) => parse_date("check-in", &text)?,
        None => today,
    };
    let check_out = match non_empty(&form.check_out) {
        Some(text) => parse_date("check-out", &text)?,
        None => check_in + Duration::days(1),
    };

    let reservation = build_reservation(
        client,
        room_category,
        check_in,
        check_out,
        room_category.nightly_price(),
        non_empty(&form.payment),
    );

    Ok(match form.price {
        Some(price) => reservation.with_price(price),
        None => reservation,
    })
}

/// Every stored reservation as display text
pub fn list_reservations(store: &ReservationStore) -> String {
    if store.is_empty() {
        return EMPTY_LISTING.to_string();
    }

    store
        .reservations()
        .iter()
        .map(Reservation::describe)
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Person;
    use crate::error::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_store() -> (ReservationStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = ReservationStore::open(temp_dir.path().join("reservations.txt")).unwrap();
        (store, temp_dir)
    }

    fn ana_form() -> BookingForm {
        BookingForm {
            name: "Ana Silva".to_string(),
            national_id: "12345678901".to_string(),
            check_in: "01/06/2024".to_string(),
            check_out: "02/06/2024".to_string(),
            room_category: Some(RoomCategory::Simple),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_submit_appends_line() {
        let (mut store, _temp_dir) = setup_test_store();

        let reservation = submit_reservation_on(&mut store, &ana_form(), today()).unwrap();

        assert_eq!(reservation.price(), 150.0);
        assert_eq!(store.len(), 1);
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "Ana Silva,12345678901,01/06/2024,02/06/2024,Simple,150.00,\n"
        );
    }

    #[test]
    fn test_short_national_id_writes_nothing() {
        let (mut store, _temp_dir) = setup_test_store();
        let form = BookingForm {
            national_id: "123".to_string(),
            ..ana_form()
        };

        let err = submit_reservation_on(&mut store, &form, today()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_missing_room_writes_nothing() {
        let (mut store, _temp_dir) = setup_test_store();
        let form = BookingForm {
            room_category: None,
            ..ana_form()
        };

        let err = submit_reservation_on(&mut store, &form, today()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NoSelection);
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_bad_birthdate_writes_nothing() {
        let (mut store, _temp_dir) = setup_test_store();
        let form = BookingForm {
            birthdate: "15-03-1990".to_string(),
            ..ana_form()
        };

        let err = submit_reservation_on(&mut store, &form, today()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDate);
        assert!(store.is_empty());
    }

    #[test]
    fn test_line_break_in_name_writes_nothing() {
        let (mut store, _temp_dir) = setup_test_store();
        let form = BookingForm {
            name: "Ana\nSilva".to_string(),
            ..ana_form()
        };

        let err = submit_reservation_on(&mut store, &form, today()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert!(store.is_empty());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_default_stay_is_one_night_from_today() {
        let (mut store, _temp_dir) = setup_test_store();
        let form = BookingForm {
            check_in: String::new(),
            check_out: String::new(),
            room_category: Some(RoomCategory::Premium),
            ..ana_form()
        };

        let reservation = submit_reservation_on(&mut store, &form, today()).unwrap();

        assert_eq!(reservation.check_in(), today());
        assert_eq!(
            reservation.check_out(),
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
        );
        assert_eq!(reservation.price(), 450.0);
    }

    #[test]
    fn test_fields_are_trimmed_and_extras_kept() {
        let (mut store, _temp_dir) = setup_test_store();
        let form = BookingForm {
            name: "  Ana Silva ".to_string(),
            national_id: " 12345678901 ".to_string(),
            birthdate: "15/03/1990".to_string(),
            phone: "+55 11 99999-0000".to_string(),
            payment: " Pix ".to_string(),
            price: Some(120.0),
            ..ana_form()
        };

        let reservation = submit_reservation_on(&mut store, &form, today()).unwrap();

        assert_eq!(reservation.client().name(), "Ana Silva");
        assert_eq!(reservation.client().phone(), Some("+55 11 99999-0000"));
        assert_eq!(reservation.payment(), Some("Pix"));
        assert_eq!(reservation.price(), 120.0);
        assert!(reservation.describe().contains("Birthdate: 15/03/1990"));
    }

    #[test]
    fn test_list_reservations() {
        let (mut store, _temp_dir) = setup_test_store();
        assert_eq!(list_reservations(&store), EMPTY_LISTING);

        submit_reservation_on(&mut store, &ana_form(), today()).unwrap();
        let form = BookingForm {
            name: "Bruno Costa".to_string(),
            national_id: "10987654321".to_string(),
            room_category: Some(RoomCategory::Luxury),
            ..ana_form()
        };
        submit_reservation_on(&mut store, &form, today()).unwrap();

        let listing = list_reservations(&store);
        assert_eq!(listing.matches("--------").count(), 2);
        assert!(listing.starts_with("Name: Ana Silva"));
        assert!(listing.contains("Name: Bruno Costa"));
        assert!(listing.contains("Room type: Luxury"));
    }
}
