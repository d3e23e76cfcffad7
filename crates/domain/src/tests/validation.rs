// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveTime};

use crate::{
    DomainError, ServiceTime, parse_service_date, parse_service_time, validate_dispute_reason,
    validate_price,
};

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_parse_plain_service_date() {
    assert_eq!(
        parse_service_date("2026-07-04").unwrap(),
        NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()
    );
    assert_eq!(
        parse_service_date(" 2026-07-04 ").unwrap(),
        NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()
    );
}

#[test]
fn test_parse_timestamp_service_date() {
    assert_eq!(
        parse_service_date("2026-07-04T00:00:00.000Z").unwrap(),
        NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()
    );
    assert_eq!(
        parse_service_date("2026-07-04T21:00:00-05:00").unwrap(),
        NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()
    );
}

#[test]
fn test_parse_invalid_service_date() {
    for raw in ["", "04/07/2026", "2026-13-01", "soon"] {
        match parse_service_date(raw) {
            Err(DomainError::DateParseError { date_string, .. }) => assert_eq!(date_string, raw),
            other => panic!("Expected DateParseError for {raw:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_parse_single_service_time() {
    assert_eq!(
        parse_service_time("14:30").unwrap(),
        ServiceTime::At(hm(14, 30))
    );
}

#[test]
fn test_parse_service_time_range() {
    assert_eq!(
        parse_service_time("09:00 - 17:30").unwrap(),
        ServiceTime::Range {
            start: hm(9, 0),
            end: hm(17, 30)
        }
    );
}

#[test]
fn test_reversed_range_is_rejected() {
    assert!(matches!(
        parse_service_time("18:00-09:00"),
        Err(DomainError::InvalidServiceTime { .. })
    ));
}

#[test]
fn test_malformed_clock_time_is_rejected() {
    assert!(parse_service_time("25:00").is_err());
    assert!(parse_service_time("9:00-").is_err());
}

#[test]
fn test_free_text_service_time() {
    assert_eq!(
        parse_service_time("after lunch").unwrap(),
        ServiceTime::FreeText(String::from("after lunch"))
    );
}

#[test]
fn test_validate_price() {
    for ok in ["0", "12", "12.5", "1200.00"] {
        assert!(validate_price(ok).is_ok(), "{ok}");
    }
    for bad in ["", "-5", "12.", ".5", "12.345", "1,200", "abc"] {
        assert_eq!(
            validate_price(bad),
            Err(DomainError::InvalidPrice(bad.to_string())),
            "{bad}"
        );
    }
}

#[test]
fn test_validate_dispute_reason() {
    assert_eq!(validate_dispute_reason("  No show "), Ok("No show"));
    assert_eq!(
        validate_dispute_reason("   "),
        Err(DomainError::EmptyDisputeReason)
    );
}
