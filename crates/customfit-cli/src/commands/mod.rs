//! CLI Commands

pub mod config;
pub mod submit;
pub mod validate;

use crate::output::Report;
use crate::BookingArgs;
use customfit_booking::validation::{APPOINTMENT_DATE, APPOINTMENT_TIME};
use customfit_booking::{dom::MemoryForm, Measurement, SubmitDisposition};

pub const SUBMIT_LABEL: &str = "Book Appointment";

/// In-memory booking form filled from the command line
pub fn booking_form(args: &BookingArgs) -> MemoryForm {
    let form = MemoryForm::with_submit_button(SUBMIT_LABEL);
    form.set_field(APPOINTMENT_DATE, args.date.as_str());
    form.set_field(APPOINTMENT_TIME, args.time.as_str());
    for (measurement, value) in [
        (Measurement::Chest, &args.chest),
        (Measurement::Waist, &args.waist),
        (Measurement::Hips, &args.hips),
        (Measurement::Length, &args.length),
    ] {
        form.set_field(measurement.field_id(), value.as_str());
    }
    for (name, value) in &args.fields {
        form.set_field(name, value.as_str());
    }
    form
}

impl From<&SubmitDisposition> for Report {
    fn from(disposition: &SubmitDisposition) -> Self {
        match disposition {
            SubmitDisposition::Ignored => Report::new("ignored", "submission already in flight"),
            SubmitDisposition::Invalid(err) => Report::new("invalid", err.to_string()),
            SubmitDisposition::Rejected(message) => Report::new("rejected", message.as_str()),
            SubmitDisposition::Failed(message) => Report::new("failed", message.as_str()),
            SubmitDisposition::Redirected(url) => {
                Report::new("accepted", "booking created").with_redirect(url.as_str())
            }
        }
    }
}
