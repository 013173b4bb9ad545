//! Booking field validation
//!
//! Submit-time checks run in a fixed order and stop at the first failure:
//! - appointment date must not be before today
//! - chest, waist, hips, length must lie in (min, max]
//! - optionally, the appointment time must fall inside business hours
//!
//! Values that do not parse at all are left for the server to reject; only a
//! value that parses and breaks a bound fails here.
//!
//! The time-of-day check also runs on its own when the time input changes.

use crate::clock::Clock;
use crate::config::BookingConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

pub const APPOINTMENT_DATE: &str = "appointment_date";
pub const APPOINTMENT_TIME: &str = "appointment_time";

/// Body measurement collected by the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measurement {
    Chest,
    Waist,
    Hips,
    Length,
}

impl Measurement {
    /// Validation order
    pub const ALL: [Measurement; 4] = [
        Measurement::Chest,
        Measurement::Waist,
        Measurement::Hips,
        Measurement::Length,
    ];

    /// Input element id, also the field name in the payload
    pub fn field_id(&self) -> &'static str {
        match self {
            Measurement::Chest => "chest",
            Measurement::Waist => "waist",
            Measurement::Hips => "hips",
            Measurement::Length => "length",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_id())
    }
}

/// Client-side validation failure. `Display` is the banner text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please select a future date")]
    PastDate,

    #[error("Please enter a valid {measurement} measurement (between {min} and {max} inches)")]
    InvalidMeasurement {
        measurement: Measurement,
        min: f64,
        max: f64,
    },

    #[error("Please select a time between {} and {}", hour_label(.opening), hour_label(.closing))]
    OutsideBusinessHours { opening: u32, closing: u32 },
}

fn hour_label(hour: &u32) -> String {
    BookingConfig::display_hour(*hour)
}

/// Raw field values read from the form at submit time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSnapshot {
    pub appointment_date: String,
    pub appointment_time: String,
    pub chest: String,
    pub waist: String,
    pub hips: String,
    pub length: String,
}

impl FieldSnapshot {
    /// Build a snapshot through a field lookup; missing fields read as empty
    pub fn read<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut get = |id: &str| lookup(id).unwrap_or_default();
        Self {
            appointment_date: get(APPOINTMENT_DATE),
            appointment_time: get(APPOINTMENT_TIME),
            chest: get(Measurement::Chest.field_id()),
            waist: get(Measurement::Waist.field_id()),
            hips: get(Measurement::Hips.field_id()),
            length: get(Measurement::Length.field_id()),
        }
    }

    pub fn measurement(&self, measurement: Measurement) -> &str {
        match measurement {
            Measurement::Chest => &self.chest,
            Measurement::Waist => &self.waist,
            Measurement::Hips => &self.hips,
            Measurement::Length => &self.length,
        }
    }
}

/// Parse a `YYYY-MM-DD` date input value
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Hour component of an `HH:MM` time input value
pub fn parse_hour(value: &str) -> Option<u32> {
    value.split(':').next()?.trim().parse().ok()
}

/// Leading decimal number of `value`, ignoring trailing text ("38in" -> 38).
/// `None` when no number starts the value. `Infinity` parses as infinite.
pub fn parse_measurement(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let unsigned = value.trim_start_matches(['+', '-']);
    let sign_len = value.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    if unsigned.starts_with("Infinity") {
        let negative = value.starts_with('-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let candidate_len = sign_len
        + unsigned
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')))
            .unwrap_or(unsigned.len());
    (1..=candidate_len)
        .rev()
        .find_map(|end| value[..end].parse::<f64>().ok())
}

/// Field validator
#[derive(Clone)]
pub struct BookingValidator {
    config: BookingConfig,
    clock: Rc<dyn Clock>,
}

impl BookingValidator {
    pub fn new(config: BookingConfig, clock: Rc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Run the submit-time sequence, stopping at the first failure
    pub fn validate(&self, fields: &FieldSnapshot) -> Result<(), ValidationError> {
        self.check_date(&fields.appointment_date)?;
        for measurement in Measurement::ALL {
            self.check_measurement(measurement, fields.measurement(measurement))?;
        }
        if self.config.enforce_hours_on_submit {
            self.check_time(&fields.appointment_time)?;
        }
        Ok(())
    }

    /// Same-day bookings pass; only strictly earlier dates fail. An empty or
    /// malformed date passes and is returned as `None`.
    pub fn check_date(&self, value: &str) -> Result<Option<NaiveDate>, ValidationError> {
        let Some(date) = parse_date(value) else {
            tracing::debug!(value, "appointment date unparsed, leaving it to the server");
            return Ok(None);
        };
        let today = self.clock.today();
        tracing::debug!(%date, %today, "checking appointment date");
        if date < today {
            return Err(ValidationError::PastDate);
        }
        Ok(Some(date))
    }

    /// Fails only on a number outside (min, max]. A value with no leading
    /// number passes and is returned as `None`.
    pub fn check_measurement(
        &self,
        measurement: Measurement,
        value: &str,
    ) -> Result<Option<f64>, ValidationError> {
        let min = self.config.measurement_min_exclusive;
        let max = self.config.measurement_max;
        match parse_measurement(value) {
            None => Ok(None),
            Some(v) if v > min && v <= max => Ok(Some(v)),
            Some(_) => Err(ValidationError::InvalidMeasurement {
                measurement,
                min,
                max,
            }),
        }
    }

    /// Unparseable values count as outside business hours
    pub fn check_time(&self, value: &str) -> Result<u32, ValidationError> {
        let opening = self.config.opening_hour;
        let closing = self.config.closing_hour;
        match parse_hour(value) {
            Some(hour) if hour >= opening && hour < closing => Ok(hour),
            _ => Err(ValidationError::OutsideBusinessHours { opening, closing }),
        }
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }
}
