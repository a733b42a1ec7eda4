//! Momentum-file loader.
//!
//! Purpose
//! -------
//! Turn a whitespace-separated stream of `px+ py+ pz+ px- py- pz-` records
//! into a validated [`EventSample`] of minus-charge `cos θ` values.
//!
//! Key behaviors
//! -------------
//! - Tokens are grouped in sixes; line breaks carry no meaning.
//! - Only complete, successfully parsed records are counted. End of input
//!   is detected directly, so no trailing phantom record is produced or
//!   subtracted.
//! - Capacity overflow follows [`LoadOptions::overflow`]: truncate with a
//!   `warn!` and a `truncated` flag, or fail.
//! - A trailing partial record is an error, not silently dropped.
//!
//! Conventions
//! -----------
//! - Failure to open or read the file is fatal for the caller
//!   ([`DataError::Io`]); an input without records is
//!   [`DataError::EmptySample`].
use crate::events::{
    errors::{DataError, DataResult},
    momentum::MomentumPair,
    options::{LoadOptions, OverflowPolicy},
    sample::{EventSample, SampleMeta},
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, info, warn};

/// Fields per record: two three-momenta.
pub const FIELDS_PER_RECORD: usize = 6;

const STREAM_SOURCE: &str = "<stream>";

/// Open `path` and parse it with [`parse_events`].
///
/// # Errors
/// - [`DataError::Io`] if the file cannot be opened or read.
/// - Every error of [`parse_events`].
pub fn load_events<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> DataResult<EventSample> {
    let path = path.as_ref();
    let shown = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| DataError::Io { path: shown.clone(), message: e.to_string() })?;
    debug!(path = %shown, "reading events");
    parse_events(BufReader::new(file), opts).map_err(|err| match err {
        DataError::Io { message, .. } => DataError::Io { path: shown.clone(), message },
        other => other,
    })
}

/// Parse momentum records from any buffered reader.
///
/// # Errors
/// - [`DataError::Io`] on read failures.
/// - [`DataError::ParseField`], [`DataError::NonFiniteMomentum`],
///   [`DataError::ZeroMomentum`] for the first bad record.
/// - [`DataError::IncompleteRecord`] if the input ends mid-record.
/// - [`DataError::CapacityExceeded`] under [`OverflowPolicy::Error`].
/// - [`DataError::EmptySample`] if no record was read.
pub fn parse_events<R: BufRead>(reader: R, opts: &LoadOptions) -> DataResult<EventSample> {
    let mut cos_theta: Vec<f64> = Vec::with_capacity(opts.capacity.unwrap_or(0).min(1 << 16));
    let mut fields = [0.0_f64; FIELDS_PER_RECORD];
    let mut filled = 0usize;
    let mut truncated = false;

    'lines: for line in reader.lines() {
        let line = line
            .map_err(|e| DataError::Io { path: STREAM_SOURCE.to_string(), message: e.to_string() })?;
        for token in line.split_whitespace() {
            let record = cos_theta.len();
            if filled == 0 && opts.capacity.is_some_and(|cap| record >= cap) {
                let capacity = record;
                match opts.overflow {
                    OverflowPolicy::Error => return Err(DataError::CapacityExceeded { capacity }),
                    OverflowPolicy::Truncate => {
                        warn!(
                            capacity,
                            attempted = capacity + 1,
                            "event capacity reached, ignoring remaining records"
                        );
                        truncated = true;
                        break 'lines;
                    }
                }
            }
            fields[filled] = token.parse::<f64>().map_err(|_| DataError::ParseField {
                record,
                field: filled,
                token: token.to_string(),
            })?;
            filled += 1;
            if filled == FIELDS_PER_RECORD {
                let pair = MomentumPair::from_fields(record, &fields)?;
                cos_theta.push(pair.cos_theta(record)?);
                filled = 0;
            }
        }
    }

    if filled != 0 {
        return Err(DataError::IncompleteRecord { record: cos_theta.len(), fields: filled });
    }

    let records_read = cos_theta.len();
    info!(events = records_read, truncated, "events read");
    EventSample::new(cos_theta.into(), SampleMeta { records_read, truncated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn records(n: usize) -> String {
        (0..n)
            .map(|i| {
                let pz = if i % 2 == 0 { 1.0 } else { -1.0 };
                format!("0.1 0.2 0.3 0.0 1.0 {pz}\n")
            })
            .collect()
    }

    #[test]
    // Purpose
    // -------
    // Exactly `k` valid records yield exactly `k` events, with or without a
    // trailing newline.
    //
    // Given
    // -----
    // - Three records, once with a final newline and once without.
    //
    // Expect
    // ------
    // - Three events each time; `records_read == 3`, not truncated.
    fn parse_counts_only_complete_records() {
        let with_newline = records(3);
        let without_newline = with_newline.trim_end().to_string();

        for text in [with_newline, without_newline] {
            let sample = parse_events(Cursor::new(text), &LoadOptions::default()).unwrap();
            assert_eq!(sample.len(), 3);
            assert_eq!(sample.meta(), SampleMeta { records_read: 3, truncated: false });
        }
    }

    #[test]
    // Purpose
    // -------
    // Line breaks are not significant and cos θ comes from the last three
    // fields.
    //
    // Given
    // -----
    // - One record split over two lines: "9 9 9 0 3\n4".
    //
    // Expect
    // ------
    // - One event with cos θ = 4/5.
    fn parse_ignores_line_structure() {
        let sample =
            parse_events(Cursor::new("9 9 9 0 3\n4\n"), &LoadOptions::default()).unwrap();

        assert_eq!(sample.len(), 1);
        assert!((sample.values()[0] - 0.8).abs() < 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Malformed inputs surface as precise errors.
    //
    // Given
    // -----
    // - A non-numeric token in record 1, field 2.
    // - Seven tokens (one full record plus one field).
    // - Blank input.
    //
    // Expect
    // ------
    // - `ParseField`, `IncompleteRecord { record: 1, fields: 1 }`, `EmptySample`.
    fn parse_reports_malformed_input() {
        let bad_token = format!("{}0 0 abc 0 0 1\n", records(1));
        assert_eq!(
            parse_events(Cursor::new(bad_token), &LoadOptions::default()),
            Err(DataError::ParseField { record: 1, field: 2, token: "abc".to_string() })
        );

        assert_eq!(
            parse_events(Cursor::new("1 2 3 4 5 6 7"), &LoadOptions::default()),
            Err(DataError::IncompleteRecord { record: 1, fields: 1 })
        );

        assert_eq!(
            parse_events(Cursor::new("\n  \n"), &LoadOptions::default()),
            Err(DataError::EmptySample)
        );
    }

    #[test]
    // Purpose
    // -------
    // Capacity overflow honours the configured policy.
    //
    // Given
    // -----
    // - Five records with capacity 3, under `Truncate` then `Error`.
    // - Exactly three records with capacity 3.
    //
    // Expect
    // ------
    // - Truncate: three events, `truncated == true`.
    // - Error: `CapacityExceeded { capacity: 3 }`.
    // - Exactly at capacity: not truncated.
    fn parse_applies_overflow_policy() {
        let truncate = LoadOptions::new(Some(3), OverflowPolicy::Truncate).unwrap();
        let strict = LoadOptions::new(Some(3), OverflowPolicy::Error).unwrap();

        let sample = parse_events(Cursor::new(records(5)), &truncate).unwrap();
        assert_eq!(sample.len(), 3);
        assert!(sample.meta().truncated);

        assert_eq!(
            parse_events(Cursor::new(records(5)), &strict),
            Err(DataError::CapacityExceeded { capacity: 3 })
        );

        let exact = parse_events(Cursor::new(records(3)), &strict).unwrap();
        assert!(!exact.meta().truncated);
    }

    #[test]
    // Purpose
    // -------
    // A missing file is a fatal I/O error that names the path.
    //
    // Given
    // -----
    // - A path that does not exist.
    //
    // Expect
    // ------
    // - `DataError::Io` carrying the path.
    fn load_missing_file_is_io_error() {
        let err = load_events("/definitely/not/here/L3.dat", &LoadOptions::default()).unwrap_err();

        assert!(matches!(err, DataError::Io { ref path, .. } if path.ends_with("L3.dat")));
    }
}
