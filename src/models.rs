use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassListing {
    pub id: i64,
    pub class_name: String,
    pub zip_code: String,
    pub instructor: String,
    pub time_slot: TimeSlot,
    pub description: Option<String>,
    pub capacity: i32,
    #[serde(deserialize_with = "utc_or_naive")]
    pub created_at: DateTime<Utc>,
}

/// `timestamptz` columns arrive with an offset, plain `timestamp` columns
/// without one. Naive values are taken as UTC.
fn utc_or_naive<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// A listing that passed validation and has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewListing {
    pub class_name: String,
    pub zip_code: ZipCode,
    pub instructor: String,
    pub time_slot: TimeSlot,
    pub description: Option<String>,
    pub capacity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
        }
    }

    pub fn range(self) -> &'static str {
        match self {
            TimeSlot::Morning => "6:00 AM - 12:00 PM",
            TimeSlot::Afternoon => "12:00 PM - 5:00 PM",
            TimeSlot::Evening => "5:00 PM - 10:00 PM",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.range())
    }
}

impl FromStr for TimeSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownTimeSlot(s.to_string()))
    }
}

/// Exactly five ASCII digits, no padding. Only obtainable through [`ZipCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.len() == 5 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(ZipCode(raw.to_string()))
        } else {
            Err(ValidationError::InvalidZip)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_code_needs_five_digits() {
        assert_eq!(ZipCode::parse("10001").unwrap().as_str(), "10001");
        assert_eq!(ZipCode::parse("02139").unwrap().as_str(), "02139");
        for bad in ["", "1000", "100011", "1000a", "10 01", "１０００１", " 10001", "10001\n", " 10001 "] {
            assert_eq!(ZipCode::parse(bad), Err(ValidationError::InvalidZip), "{bad:?}");
        }
    }

    #[test]
    fn created_at_with_or_without_offset() {
        let row = |created_at: &str| {
            serde_json::json!({
                "id": 1,
                "class_name": "Spin",
                "zip_code": "10001",
                "instructor": "Kai",
                "time_slot": "Morning",
                "description": null,
                "capacity": 10,
                "created_at": created_at
            })
        };
        let naive: ClassListing =
            serde_json::from_value(row("2024-05-01T12:30:00.123456")).unwrap();
        let offset: ClassListing =
            serde_json::from_value(row("2024-05-01T14:30:00.123456+02:00")).unwrap();
        assert_eq!(naive.created_at, offset.created_at);
        assert_eq!(naive.created_at.to_rfc3339(), "2024-05-01T12:30:00.123456+00:00");
        assert!(serde_json::from_value::<ClassListing>(row("yesterday")).is_err());
    }

    #[test]
    fn time_slot_labels() {
        assert_eq!("Evening".parse::<TimeSlot>(), Ok(TimeSlot::Evening));
        assert_eq!("morning".parse::<TimeSlot>(), Ok(TimeSlot::Morning));
        assert!("Night".parse::<TimeSlot>().is_err());
        assert_eq!(TimeSlot::Afternoon.to_string(), "Afternoon (12:00 PM - 5:00 PM)");
        assert_eq!(serde_json::to_string(&TimeSlot::Morning).unwrap(), "\"Morning\"");
    }
}
