// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Input parsing and validation performed before a request leaves the client.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, NaiveTime};

/// A parsed service time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceTime {
    /// A single start time, `HH:MM`.
    At(NaiveTime),
    /// A start and end time, `HH:MM-HH:MM`.
    Range {
        start: NaiveTime,
        end: NaiveTime,
    },
    /// Anything else the artist typed ("evening", "after 6").
    FreeText(String),
}

/// Parses a service date sent by the server.
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, whose
/// calendar date is used as written (no timezone conversion).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if neither form matches.
pub fn parse_service_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|e| DomainError::DateParseError {
            date_string: raw.to_string(),
            error: e.to_string(),
        })
}

/// Parses a service time.
///
/// Values that look like a clock time or range must be valid; anything
/// without a digit-colon-digit shape is kept as free text.
///
/// # Errors
///
/// Returns `DomainError::InvalidServiceTime` for malformed clock times and
/// for ranges whose end is not after their start.
pub fn parse_service_time(raw: &str) -> Result<ServiceTime, DomainError> {
    let trimmed = raw.trim();
    if !looks_like_clock(trimmed) {
        return Ok(ServiceTime::FreeText(trimmed.to_string()));
    }

    let invalid = |reason: &str| DomainError::InvalidServiceTime {
        time_string: raw.to_string(),
        reason: reason.to_string(),
    };
    let parse = |s: &str| {
        NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| invalid("expected HH:MM"))
    };

    match trimmed.split_once('-') {
        Some((start, end)) => {
            let start = parse(start)?;
            let end = parse(end)?;
            if end <= start {
                return Err(invalid("end time must be after start time"));
            }
            Ok(ServiceTime::Range { start, end })
        }
        None => Ok(ServiceTime::At(parse(trimmed)?)),
    }
}

fn looks_like_clock(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit()) && s.contains(':')
}

/// Validates a quote price: a non-negative decimal with at most two fractional digits.
///
/// # Errors
///
/// Returns `DomainError::InvalidPrice` otherwise.
pub fn validate_price(raw: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidPrice(raw.to_string());
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (raw, None),
    };
    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    match fraction {
        Some(f) if f.is_empty() || f.len() > 2 || !f.chars().all(|c| c.is_ascii_digit()) => {
            Err(invalid())
        }
        _ => Ok(()),
    }
}

/// Validates a dispute reason and returns it trimmed.
///
/// # Errors
///
/// Returns `DomainError::EmptyDisputeReason` for blank input.
pub fn validate_dispute_reason(reason: &str) -> Result<&str, DomainError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        Err(DomainError::EmptyDisputeReason)
    } else {
        Ok(trimmed)
    }
}
