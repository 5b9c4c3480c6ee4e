// 🗄️ Reservation Store - append-only text file
//
// One reservation per line, seven comma-joined fields, no header:
//   name,national_id,check_in,check_out,room_category,price,payment
//
// Values are never quoted or escaped. A comma inside a value shifts the
// columns and the line is skipped on reload.

use crate::entities::{build_reservation, Client, Person, Reservation, RoomCategory};
use crate::error::{ReservationError, Result};
use crate::validation::{format_date, parse_date, validate_national_id};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind as IoErrorKind};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Number of columns in a stored line
pub const FIELD_COUNT: usize = 7;

const DELIMITER: u8 = b',';

pub const LINE_BREAK_MESSAGE: &str = "Fields cannot contain line breaks.";

// ============================================================================
// STORE
// ============================================================================

/// In-memory mirror of the reservation file
///
/// Opening the store performs one full load. After that every successful
/// `append` adds exactly one line to the file and one entry in memory.
#[derive(Debug)]
pub struct ReservationStore {
    path: PathBuf,
    reservations: Vec<Reservation>,
}

impl ReservationStore {
    /// Open the store and load whatever the file already holds
    ///
    /// A missing file is an empty store; it is created on the first append.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut store = ReservationStore::unloaded(path);
        store.reload()?;

        info!(
            "Opened reservation store {} with {} reservations",
            store.path.display(),
            store.reservations.len()
        );
        Ok(store)
    }

    /// Open the store, falling back to an empty one when the load fails
    ///
    /// The load error is handed back so the caller can report it; a later
    /// `reload` retries the read.
    pub fn open_or_empty<P: AsRef<Path>>(path: P) -> (Self, Option<ReservationError>) {
        let mut store = ReservationStore::unloaded(path);
        match store.reload() {
            Ok(()) => (store, None),
            Err(err) => {
                error!("Could not load {}: {}", store.path.display(), err);
                (store, Some(err))
            }
        }
    }

    fn unloaded<P: AsRef<Path>>(path: P) -> Self {
        ReservationStore {
            path: path.as_ref().to_path_buf(),
            reservations: Vec::new(),
        }
    }

    /// Append one reservation to the file, then to memory
    ///
    /// The file handle is flushed and closed before returning. Memory is only
    /// touched once the line is written. Values holding a line break are
    /// rejected, since they would split the record over two lines.
    pub fn append(&mut self, reservation: Reservation) -> Result<()> {
        let record = to_record(&reservation);
        if record.iter().any(|field| field.contains(['\n', '\r'])) {
            return Err(ReservationError::InvalidFormat(
                LINE_BREAK_MESSAGE.to_string(),
            ));
        }

        {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;

            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .delimiter(DELIMITER)
                .quote_style(QuoteStyle::Never)
                .terminator(Terminator::Any(b'\n'))
                .from_writer(file);

            writer.write_record(&record)?;
            writer.flush()?;
        }

        info!(
            "Saved reservation for {} ({})",
            reservation.client().name(),
            reservation.room_category()
        );
        self.reservations.push(reservation);
        Ok(())
    }

    /// Read every reservation in the file from the start
    ///
    /// Blank lines are skipped. Bytes that are not UTF-8 are replaced with
    /// U+FFFD. Lines that cannot be turned into a reservation are logged and
    /// skipped. A non-numeric price aborts the whole read with `ParseFailure`.
    pub fn load_all(&self) -> Result<Vec<Reservation>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(DELIMITER)
            .flexible(true)
            .quoting(false)
            .from_reader(BufReader::new(file));

        let mut reservations = Vec::new();
        let mut skipped = 0;

        for result in reader.byte_records() {
            let raw = result?;
            let line = raw.position().map(|pos| pos.line()).unwrap_or(0);
            let record = StringRecord::from_byte_record_lossy(raw);

            if is_blank(&record) {
                continue;
            }

            match from_record(&record, line) {
                Ok(reservation) => reservations.push(reservation),
                Err(ReservationError::MalformedRecord { line, reason }) => {
                    warn!("Skipping line {} of {}: {}", line, self.path.display(), reason);
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        if skipped > 0 {
            warn!(
                "Loaded {} reservations, skipped {} malformed lines",
                reservations.len(),
                skipped
            );
        }

        Ok(reservations)
    }

    /// Replace the in-memory sequence with a fresh read of the file
    pub fn reload(&mut self) -> Result<()> {
        self.reservations = self.load_all()?;
        Ok(())
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ============================================================================
// LINE FORMAT
// ============================================================================

fn to_record(reservation: &Reservation) -> [String; FIELD_COUNT] {
    let client = reservation.client();
    [
        client.name().to_string(),
        client.national_id().to_string(),
        format_date(reservation.check_in()),
        format_date(reservation.check_out()),
        reservation.room_category().name().to_string(),
        format!("{:.2}", reservation.price()),
        reservation.payment().unwrap_or("").to_string(),
    ]
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn from_record(record: &StringRecord, line: u64) -> Result<Reservation> {
    let malformed = |reason: String| ReservationError::MalformedRecord { line, reason };

    if record.len() != FIELD_COUNT {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            record.len()
        )));
    }

    let price_text = &record[5];
    if price_text.trim().is_empty() {
        return Err(malformed("missing price".to_string()));
    }
    let price: f64 = price_text
        .trim()
        .parse()
        .map_err(|_| ReservationError::ParseFailure {
            line,
            value: price_text.to_string(),
        })?;

    let national_id =
        validate_national_id(&record[1]).map_err(|_| malformed("invalid CPF".to_string()))?;
    let check_in = parse_date("check-in", &record[2]).map_err(|e| malformed(e.to_string()))?;
    let check_out = parse_date("check-out", &record[3]).map_err(|e| malformed(e.to_string()))?;
    let room_category = RoomCategory::from_name(&record[4])
        .ok_or_else(|| malformed(format!("unknown room type '{}'", &record[4])))?;

    let payment = match &record[6] {
        "" => None,
        text => Some(text.to_string()),
    };

    let client = Client::new(record[0].to_string(), national_id);
    Ok(build_reservation(
        client,
        room_category,
        check_in,
        check_out,
        price,
        payment,
    ))
}

// ============================================================================
// TESTS
// ============================================================================
