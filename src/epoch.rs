//! Observation time handling: MJD conversion and parsing.

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};

/// MJD of the Unix epoch, 1970-01-01T00:00:00Z.
const MJD_UNIX_EPOCH: f64 = 40_587.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, thiserror::Error)]
pub enum EpochError {
    #[error(
        "invalid observation time '{0}': expected MJD, YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or RFC 3339"
    )]
    Invalid(String),

    #[error("MJD {0} is out of range")]
    OutOfRange(f64),
}

/// Modified Julian Date of a timestamp.
#[allow(clippy::cast_precision_loss)]
pub fn to_mjd(at: Timestamp) -> f64 {
    let seconds = at.as_second() as f64 + f64::from(at.subsec_nanosecond()) * 1e-9;
    seconds / SECONDS_PER_DAY + MJD_UNIX_EPOCH
}

/// Timestamp for a Modified Julian Date.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn from_mjd(mjd: f64) -> Result<Timestamp, EpochError> {
    let seconds = (mjd - MJD_UNIX_EPOCH) * SECONDS_PER_DAY;
    if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
        return Err(EpochError::OutOfRange(mjd));
    }
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as i32).min(999_999_999);
    Timestamp::new(whole as i64, nanos).map_err(|_| EpochError::OutOfRange(mjd))
}

/// Parse an observation time.
///
/// Anything without a dash is read as an MJD. Dates and civil datetimes
/// are taken as UTC.
pub fn parse(raw: &str) -> Result<Timestamp, EpochError> {
    let raw = raw.trim();
    let invalid = || EpochError::Invalid(raw.to_string());

    if !raw.contains('-') {
        let mjd: f64 = raw.parse().map_err(|_| invalid())?;
        return from_mjd(mjd);
    }

    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts);
    }

    let datetime = match raw.parse::<DateTime>() {
        Ok(dt) => dt,
        Err(_) => raw.parse::<Date>().map_err(|_| invalid())?.at(0, 0, 0, 0),
    };
    datetime
        .to_zoned(TimeZone::UTC)
        .map(|zoned| zoned.timestamp())
        .map_err(|_| invalid())
}
