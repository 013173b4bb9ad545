//! Booking form controller
//!
//! Owns everything a submission touches: the banner, the busy state of the
//! booking form's submit control, and the in-flight flag. A submit that
//! arrives while a request is outstanding is ignored.

use crate::banner::ErrorBanner;
use crate::busy::{BusyState, SubmissionUi};
use crate::clock::Clock;
use crate::config::BookingConfig;
use crate::dom::{BannerHost, BookingFormSurface, Navigator, TimeInput};
use crate::schedule::Scheduler;
use crate::transport::{interpret_response, SubmissionOutcome, Transport, GENERIC_FAILURE};
use crate::validation::{BookingValidator, FieldSnapshot, ValidationError};
use std::cell::Cell;
use std::rc::Rc;

/// Page elements the controller drives
pub struct PageHandles {
    pub form: Rc<dyn BookingFormSurface>,
    pub banner: Rc<dyn BannerHost>,
    pub navigator: Rc<dyn Navigator>,
}

/// Host-provided services
pub struct Services {
    pub transport: Rc<dyn Transport>,
    pub scheduler: Rc<dyn Scheduler>,
    pub clock: Rc<dyn Clock>,
}

/// How a submit attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitDisposition {
    /// Another submission was still in flight
    Ignored,
    Invalid(ValidationError),
    Rejected(String),
    Failed(String),
    Redirected(String),
}

pub struct BookingController {
    config: BookingConfig,
    validator: BookingValidator,
    banner: ErrorBanner,
    form: Rc<dyn BookingFormSurface>,
    navigator: Rc<dyn Navigator>,
    transport: Rc<dyn Transport>,
    in_flight: Cell<bool>,
}

impl BookingController {
    pub fn new(config: BookingConfig, page: PageHandles, services: Services) -> Self {
        let banner = ErrorBanner::new(page.banner, services.scheduler, config.banner_dismiss());
        Self {
            validator: BookingValidator::new(config.clone(), services.clock),
            config,
            banner,
            form: page.form,
            navigator: page.navigator,
            transport: services.transport,
            in_flight: Cell::new(false),
        }
    }

    /// Submit handler for the booking form. The host must already have
    /// cancelled the native submission.
    pub async fn handle_submit(&self) -> SubmitDisposition {
        self.banner.hide();
        if self.in_flight.get() {
            tracing::debug!("booking already in flight, ignoring submit");
            return SubmitDisposition::Ignored;
        }

        let busy = SubmissionUi::engage(&*self.form);

        let fields = FieldSnapshot::read(|id| self.form.field_value(id));
        if let Err(err) = self.validator.validate(&fields) {
            tracing::info!(error = %err, "booking rejected by validation");
            self.fail(busy, &err.to_string());
            return SubmitDisposition::Invalid(err);
        }

        let payload = self.form.form_data();
        self.in_flight.set(true);
        tracing::info!(endpoint = %self.config.endpoint, fields = payload.len(), "submitting booking");

        let outcome = match self.transport.post_form(&self.config.endpoint, &payload).await {
            Ok(response) => interpret_response(&response, &self.config.success_redirect),
            Err(e) => {
                tracing::warn!(error = %e, "booking request failed");
                SubmissionOutcome::Failed(GENERIC_FAILURE.into())
            }
        };

        match outcome {
            SubmissionOutcome::Redirect(url) => {
                // page is being replaced; stay busy and in flight
                tracing::info!(%url, "booking accepted");
                self.navigator.navigate(&url);
                SubmitDisposition::Redirected(url)
            }
            SubmissionOutcome::Rejected(message) => {
                tracing::warn!(%message, "booking rejected by server");
                self.in_flight.set(false);
                self.fail(busy, &message);
                SubmitDisposition::Rejected(message)
            }
            SubmissionOutcome::Failed(message) => {
                self.in_flight.set(false);
                self.fail(busy, &message);
                SubmitDisposition::Failed(message)
            }
        }
    }

    /// Change handler for the appointment time input. Returns whether the
    /// value was kept.
    pub fn handle_time_change(&self, input: &dyn TimeInput) -> bool {
        let value = input.value();
        match self.validator.check_time(&value) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(%value, "appointment time outside business hours");
                self.banner.show(&err.to_string());
                input.clear();
                false
            }
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    fn fail(&self, busy: Option<BusyState>, message: &str) {
        self.banner.show(message);
        if self.config.restore_on_failure {
            if let Some(busy) = busy {
                busy.restore();
            }
        }
    }
}
