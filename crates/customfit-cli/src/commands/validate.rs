//! Validate command

use crate::output::{OutputFormat, Report};
use crate::BookingArgs;
use customfit_booking::dom::BookingFormSurface;
use customfit_booking::validation::APPOINTMENT_TIME;
use customfit_booking::{BookingConfig, BookingValidator, FieldSnapshot, LocalClock};
use std::rc::Rc;

pub fn handle(args: &BookingArgs, settings: &BookingConfig, format: OutputFormat) -> anyhow::Result<bool> {
    let form = super::booking_form(args);
    let validator = BookingValidator::new(settings.clone(), Rc::new(LocalClock));
    let reports = check(&validator, &form);
    format.print(&reports);
    Ok(reports.iter().all(|r| r.outcome == "valid"))
}

/// Submit checks, then the time-of-day guard
fn check(validator: &BookingValidator, form: &dyn BookingFormSurface) -> Vec<Report> {
    let fields = FieldSnapshot::read(|id| form.field_value(id));
    let mut reports = Vec::new();

    match validator.validate(&fields) {
        Ok(()) => reports.push(Report::new("valid", "date and measurements")),
        Err(err) => reports.push(Report::new("invalid", err.to_string())),
    }

    let time = form.field_value(APPOINTMENT_TIME).unwrap_or_default();
    match validator.check_time(&time) {
        Ok(_) => reports.push(Report::new("valid", format!("appointment time {}", time))),
        Err(err) => reports.push(Report::new("invalid", err.to_string())),
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::args;
    use chrono::NaiveDate;
    use customfit_booking::FixedClock;

    fn validator() -> BookingValidator {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        BookingValidator::new(BookingConfig::default(), Rc::new(FixedClock(today)))
    }

    #[test]
    fn test_all_checks_pass() {
        let form = crate::commands::booking_form(&args("2026-11-02", "10:30"));
        let reports = check(&validator(), &form);
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.outcome == "valid"));
    }

    #[test]
    fn test_past_date_and_late_time_reported() {
        let form = crate::commands::booking_form(&args("2026-10-01", "19:00"));
        let reports = check(&validator(), &form);
        assert_eq!(reports[0].message, "Please select a future date");
        assert_eq!(reports[1].message, "Please select a time between 9 AM and 6 PM");
    }
}
