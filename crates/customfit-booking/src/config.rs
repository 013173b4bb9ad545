//! Booking controller configuration

use crate::error::{BookingError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Booking controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Booking endpoint, relative to the page origin or absolute
    pub endpoint: String,
    /// Navigation target after an accepted booking
    pub success_redirect: String,
    /// How long an error stays on screen
    pub banner_dismiss_ms: u64,
    /// First bookable hour (inclusive)
    pub opening_hour: u32,
    /// Closing hour (exclusive)
    pub closing_hour: u32,
    /// Measurements must be strictly greater than this
    pub measurement_min_exclusive: f64,
    /// Measurements must be at most this
    pub measurement_max: f64,
    /// Re-check the time of day as part of submit validation
    pub enforce_hours_on_submit: bool,
    /// Put the submit button back after a failed attempt
    pub restore_on_failure: bool,
    /// Logging level
    pub log_level: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/book".into(),
            success_redirect: "/?success=1".into(),
            banner_dismiss_ms: 5000,
            opening_hour: 9,
            closing_hour: 18,
            measurement_min_exclusive: 0.0,
            measurement_max: 100.0,
            enforce_hours_on_submit: false,
            restore_on_failure: true,
            log_level: "info".into(),
        }
    }
}

impl BookingConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Save to file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Parse and validate a JSON document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the controller cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(BookingError::Config("endpoint cannot be empty".into()));
        }
        if self.closing_hour > 24 {
            return Err(BookingError::Config(format!(
                "closing_hour {} is past midnight",
                self.closing_hour
            )));
        }
        if self.opening_hour >= self.closing_hour {
            return Err(BookingError::Config(format!(
                "opening_hour {} must be before closing_hour {}",
                self.opening_hour, self.closing_hour
            )));
        }
        if self.measurement_max <= self.measurement_min_exclusive {
            return Err(BookingError::Config(
                "measurement_max must exceed measurement_min_exclusive".into(),
            ));
        }
        Ok(())
    }

    pub fn banner_dismiss(&self) -> Duration {
        Duration::from_millis(self.banner_dismiss_ms)
    }

    /// Hour as shown to users, e.g. 9 -> "9 AM", 18 -> "6 PM"
    pub fn display_hour(hour: u32) -> String {
        match hour % 24 {
            0 => "12 AM".into(),
            h @ 1..=11 => format!("{} AM", h),
            12 => "12 PM".into(),
            h => format!("{} PM", h - 12),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_booking_page() {
        let config = BookingConfig::default();
        assert_eq!(config.endpoint, "/api/book");
        assert_eq!(config.success_redirect, "/?success=1");
        assert_eq!(config.banner_dismiss(), Duration::from_millis(5000));
        assert_eq!((config.opening_hour, config.closing_hour), (9, 18));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BookingConfig::from_json_str(r#"{"closing_hour": 17}"#).unwrap();
        assert_eq!(config.closing_hour, 17);
        assert_eq!(config.opening_hour, 9);
        assert_eq!(config.endpoint, "/api/book");
    }

    #[test]
    fn test_rejects_inverted_hours() {
        let err = BookingConfig::from_json_str(r#"{"opening_hour": 18, "closing_hour": 9}"#)
            .unwrap_err();
        assert!(matches!(err, BookingError::Config(_)));
    }

    #[test]
    fn test_rejects_empty_endpoint() {
        let config = BookingConfig {
            endpoint: "  ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_measurement_range() {
        let config = BookingConfig {
            measurement_max: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display_hour() {
        assert_eq!(BookingConfig::display_hour(9), "9 AM");
        assert_eq!(BookingConfig::display_hour(12), "12 PM");
        assert_eq!(BookingConfig::display_hour(18), "6 PM");
        assert_eq!(BookingConfig::display_hour(0), "12 AM");
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("customfit-config-{}.json", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let config = BookingConfig {
            banner_dismiss_ms: 3000,
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = BookingConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
