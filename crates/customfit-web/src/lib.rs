//! CustomFit booking page bindings
//!
//! Wires the live document to `customfit-booking`:
//! - every form gets the busy-button handler
//! - the first form is the booking form and is driven by the controller
//! - the appointment time input gets the business-hours guard
//!
//! Controller settings may be embedded in the page as
//! `<script type="application/json" id="customfit-config">`.

use customfit_booking::{BookingConfig, FormPayload};

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod timers;

#[cfg(target_arch = "wasm32")]
pub use app::start;

/// Element holding inline controller settings
pub const CONFIG_ELEMENT_ID: &str = "customfit-config";

/// Error banner element, reused when present in the markup
pub const BANNER_ID: &str = "form-errors";

/// Classes for a banner created at runtime; starts hidden
pub const BANNER_CLASSES: &str = "hidden p-4 mb-4 text-red-700 bg-red-100 rounded-lg";

/// Class toggled to show or hide the banner
pub const HIDDEN_CLASS: &str = "hidden";

pub const SUBMIT_BUTTON_SELECTOR: &str = r#"button[type="submit"]"#;

/// Settings from the inline config element; defaults when absent or invalid
pub fn config_from_inline(json: Option<&str>) -> BookingConfig {
    let Some(json) = json.map(str::trim).filter(|s| !s.is_empty()) else {
        return BookingConfig::default();
    };
    match BookingConfig::from_json_str(json) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring inline booking config");
            BookingConfig::default()
        }
    }
}

/// Text entries of a form's `FormData`, as (name, value) pairs in document
/// order. Entries whose value is not a string (file uploads) are skipped.
pub fn payload_from_entries<I>(entries: I) -> FormPayload
where
    I: IntoIterator<Item = (Option<String>, Option<String>)>,
{
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            (Some(name), Some(value)) => Some((name, value)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        assert_eq!(config_from_inline(None), BookingConfig::default());
        assert_eq!(config_from_inline(Some("   ")), BookingConfig::default());
    }

    #[test]
    fn test_inline_config_applied() {
        let config = config_from_inline(Some(r#"{"banner_dismiss_ms": 8000}"#));
        assert_eq!(config.banner_dismiss_ms, 8000);
    }

    #[test]
    fn test_form_entries_keep_text_fields_in_order() {
        let payload = payload_from_entries(vec![
            (Some("csrf_token".to_string()), Some("abc".to_string())),
            (Some("photo".to_string()), None),
            (Some("chest".to_string()), Some(String::new())),
            (Some("notes".to_string()), Some("one".to_string())),
            (Some("notes".to_string()), Some("two".to_string())),
        ]);

        let names: Vec<_> = payload.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["csrf_token", "chest", "notes", "notes"]);
        assert_eq!(payload.get("chest"), Some(""));
        assert_eq!(payload.get("photo"), None);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        assert_eq!(config_from_inline(Some("{not json")), BookingConfig::default());
        assert_eq!(
            config_from_inline(Some(r#"{"opening_hour": 20}"#)),
            BookingConfig::default()
        );
    }
}
