//! Century resolution for six-digit `YYMMDD` MRZ dates.
//!
//! Birth dates take the most recent year that is not ahead of the current
//! two-digit year, then step back a century if that would make the holder
//! older than [`MAX_AGE_YEARS`]. Expiration dates take whichever of the
//! 1900s and 2000s readings lies closer to today, preferring the 2000s on a
//! tie, so already-expired documents still resolve sensibly.

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::models::DatePurpose;
use crate::utils::{Clock, PassportError};

pub const MAX_AGE_YEARS: i32 = 120;

const OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// Resolve a `YYMMDD` value against `today`.
///
/// Returns `None` when the value is not six ASCII digits or names an
/// impossible calendar date.
pub fn resolve_date(raw: &str, purpose: DatePurpose, today: NaiveDate) -> Option<String> {
    match resolve(raw, purpose, today) {
        Ok(date) => Some(date.format(OUTPUT_FORMAT).to_string()),
        Err(err) => {
            debug!("{:?} '{}' left empty: {}", purpose, raw, err);
            None
        }
    }
}

/// Resolve a date reading "today" from `clock` at call time.
pub fn resolve_date_with<C: Clock + ?Sized>(
    raw: &str,
    purpose: DatePurpose,
    clock: &C,
) -> Option<String> {
    resolve_date(raw, purpose, clock.today())
}

fn resolve(raw: &str, purpose: DatePurpose, today: NaiveDate) -> Result<NaiveDate, PassportError> {
    let (yy, mm, dd) = split_yymmdd(raw)?;
    match purpose {
        DatePurpose::BirthDate => {
            let year = birth_year(yy, today);
            calendar_date(year, mm, dd)
        }
        DatePurpose::ExpirationDate => expiration_date(yy, mm, dd, today),
    }
}

fn split_yymmdd(raw: &str) -> Result<(i32, u32, u32), PassportError> {
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PassportError::InvalidDate(format!(
            "expected six digits, got '{}'",
            raw
        )));
    }
    let digits = raw.as_bytes();
    let pair = |i: usize| u32::from(digits[i] - b'0') * 10 + u32::from(digits[i + 1] - b'0');
    Ok((pair(0) as i32, pair(2), pair(4)))
}

fn birth_year(yy: i32, today: NaiveDate) -> i32 {
    let century = if yy > today.year() % 100 { 1900 } else { 2000 };
    let year = century + yy;
    if today.year() - year > MAX_AGE_YEARS {
        year - 100
    } else {
        year
    }
}

fn expiration_date(yy: i32, mm: u32, dd: u32, today: NaiveDate) -> Result<NaiveDate, PassportError> {
    // Both readings must exist, even though only one is kept.
    let date_2000 = calendar_date(2000 + yy, mm, dd)?;
    let date_1900 = calendar_date(1900 + yy, mm, dd)?;

    let distance = |date: NaiveDate| (date - today).num_days().abs();
    if distance(date_2000) <= distance(date_1900) {
        Ok(date_2000)
    } else {
        Ok(date_1900)
    }
}

fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, PassportError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        PassportError::InvalidDate(format!(
            "{:04}-{:02}-{:02} is not a calendar date",
            year, month, day
        ))
    })
}
