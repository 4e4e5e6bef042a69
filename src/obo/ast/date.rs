//! Date and datetime payloads
//!
//! Two different textual conventions coexist in OBO documents: the header
//! `date` clause uses the legacy `dd:mm:yyyy HH:MM` layout, while
//! `creation_date` carries an ISO-8601 date or datetime, optionally
//! timezone-aware. A UTC offset renders as a trailing `Z`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::obo::error::SyntaxError;

const HEADER_DATE_FORMAT: &str = "%d:%m:%Y %H:%M";

/// Parse the value of a header `date` clause.
pub fn parse_header_date(text: &str) -> Result<NaiveDateTime, SyntaxError> {
    NaiveDateTime::parse_from_str(text.trim(), HEADER_DATE_FORMAT).map_err(|_| {
        SyntaxError::new(format!(
            "invalid value for 'date' clause: expected dd:mm:yyyy HH:MM, found {:?}",
            text
        ))
    })
}

/// Render a header `date` clause value.
pub fn format_header_date(date: &NaiveDateTime) -> String {
    date.format(HEADER_DATE_FORMAT).to_string()
}

/// The payload of a `creation_date` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CreationDate {
    /// A calendar date, rendered `YYYY-MM-DD`.
    Date(NaiveDate),
    /// A naive datetime, rendered `YYYY-MM-DDTHH:MM:SS`.
    DateTime(NaiveDateTime),
    /// A timezone-aware datetime; a zero offset renders as a trailing `Z`.
    DateTimeTz(DateTime<FixedOffset>),
}

impl From<NaiveDate> for CreationDate {
    fn from(date: NaiveDate) -> Self {
        CreationDate::Date(date)
    }
}

impl From<NaiveDateTime> for CreationDate {
    fn from(datetime: NaiveDateTime) -> Self {
        CreationDate::DateTime(datetime)
    }
}

impl From<DateTime<FixedOffset>> for CreationDate {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        CreationDate::DateTimeTz(datetime)
    }
}

impl fmt::Display for CreationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            CreationDate::DateTime(datetime) => {
                write!(f, "{}", datetime.format("%Y-%m-%dT%H:%M:%S"))
            }
            CreationDate::DateTimeTz(datetime) => {
                if datetime.offset().local_minus_utc() == 0 {
                    write!(f, "{}", datetime.format("%Y-%m-%dT%H:%M:%SZ"))
                } else {
                    write!(f, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%:z"))
                }
            }
        }
    }
}

impl FromStr for CreationDate {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let invalid = || {
            SyntaxError::new(format!(
                "invalid value for 'creation_date' clause: {:?}",
                text
            ))
        };
        let Some(time_start) = text.find('T') else {
            return NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(CreationDate::Date)
                .map_err(|_| invalid());
        };
        let time = &text[time_start + 1..];
        let zoned = time.ends_with('Z') || time.contains('+') || time.contains('-');
        if zoned {
            DateTime::parse_from_rfc3339(text)
                .map(CreationDate::DateTimeTz)
                .map_err(|_| invalid())
        } else {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                .map(CreationDate::DateTime)
                .map_err(|_| invalid())
        }
    }
}
