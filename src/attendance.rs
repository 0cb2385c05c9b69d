//! Attendance service boundary
//!
//! Detected identifiers are submitted as `{"attendance_id": "..."}` and the
//! service answers `{"success": bool, "message": "..."}`. The transport is
//! supplied by the application through [`AttendanceReporter`].
//!
//! Identifiers issued by the service follow `EAID-YYYYMMDD-NNNN`, see
//! [`AttendanceId`].

use crate::models::Detection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix of service-issued identifiers
pub const ISSUED_PREFIX: &str = "EAID";

/// Request body for an attendance check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// Identifier read from the QR code
    pub attendance_id: String,
}

impl AttendanceRequest {
    /// Request for an arbitrary identifier
    pub fn new(attendance_id: impl Into<String>) -> Self {
        Self {
            attendance_id: attendance_id.into(),
        }
    }

    /// Serialize to the JSON body sent to the service
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<&Detection> for AttendanceRequest {
    fn from(detection: &Detection) -> Self {
        Self::new(detection.data())
    }
}

/// Response body from the attendance service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceResponse {
    /// Whether the check-in was accepted
    pub success: bool,
    /// Human-readable status from the service
    #[serde(default)]
    pub message: String,
}

impl AttendanceResponse {
    /// Parse a JSON response body
    pub fn from_json(body: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Map `success == false` to [`ReportError::Rejected`]
    pub fn into_result(self) -> Result<String, ReportError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(ReportError::Rejected(self.message))
        }
    }
}

/// Failures while reporting a detection
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    /// The service refused the check-in
    #[error("attendance rejected: {0}")]
    Rejected(String),
    /// The request never got a usable answer
    #[error("transport failure: {0}")]
    Transport(String),
    /// Body could not be encoded or decoded
    #[error("malformed attendance payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Sends attendance requests to the service
pub trait AttendanceReporter {
    /// Submit one request and return the parsed response
    fn submit(&mut self, request: &AttendanceRequest) -> Result<AttendanceResponse, ReportError>;
}

/// Malformed `EAID-YYYYMMDD-NNNN` identifier
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AttendanceIdError {
    /// Not three dash-separated parts starting with `EAID`
    #[error("expected EAID-YYYYMMDD-NNNN, got {0:?}")]
    Format(String),
    /// Date part is not a plausible calendar date
    #[error("invalid issue date {0:?}")]
    Date(String),
    /// Sequence part is not four digits or is zero
    #[error("invalid daily sequence {0:?}")]
    Sequence(String),
}

/// Identifier issued by the attendance service: `EAID-{YYYYMMDD}-{NNNN}`
///
/// The sequence counts registrations on the issue date, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttendanceId {
    year: u16,
    month: u8,
    day: u8,
    sequence: u16,
}

impl AttendanceId {
    /// Build an identifier from its parts
    pub fn new(year: u16, month: u8, day: u8, sequence: u16) -> Result<Self, AttendanceIdError> {
        if !valid_date(year, month, day) {
            return Err(AttendanceIdError::Date(format!(
                "{:04}{:02}{:02}",
                year, month, day
            )));
        }
        if sequence == 0 || sequence > 9999 {
            return Err(AttendanceIdError::Sequence(sequence.to_string()));
        }
        Ok(Self {
            year,
            month,
            day,
            sequence,
        })
    }

    /// Parse `EAID-YYYYMMDD-NNNN`
    pub fn parse(s: &str) -> Result<Self, AttendanceIdError> {
        let mut parts = s.split('-');
        let (Some(prefix), Some(date), Some(seq), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AttendanceIdError::Format(s.to_string()));
        };
        if prefix != ISSUED_PREFIX {
            return Err(AttendanceIdError::Format(s.to_string()));
        }

        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AttendanceIdError::Date(date.to_string()));
        }
        let date_err = || AttendanceIdError::Date(date.to_string());
        let year = date[0..4].parse::<u16>().map_err(|_| date_err())?;
        let month = date[4..6].parse::<u8>().map_err(|_| date_err())?;
        let day = date[6..8].parse::<u8>().map_err(|_| date_err())?;

        if seq.len() != 4 || !seq.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AttendanceIdError::Sequence(seq.to_string()));
        }
        let sequence = seq
            .parse::<u16>()
            .map_err(|_| AttendanceIdError::Sequence(seq.to_string()))?;

        Self::new(year, month, day, sequence).map_err(|err| match err {
            AttendanceIdError::Sequence(_) => AttendanceIdError::Sequence(seq.to_string()),
            _ => date_err(),
        })
    }

    /// Issue date as (year, month, day)
    pub fn date(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }

    /// Registration number on the issue date
    pub fn sequence(&self) -> u16 {
        self.sequence
    }
}

impl FromStr for AttendanceId {
    type Err = AttendanceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AttendanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:04}{:02}{:02}-{:04}",
            ISSUED_PREFIX, self.year, self.month, self.day, self.sequence
        )
    }
}

fn valid_date(year: u16, month: u8, day: u8) -> bool {
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        _ => return false,
    };
    year > 0 && (1..=days_in_month).contains(&day)
}
