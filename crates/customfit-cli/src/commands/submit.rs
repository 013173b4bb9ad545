//! Submit command

use crate::output::{OutputFormat, Report};
use crate::BookingArgs;
use customfit_booking::dom::{MemoryBanner, RecordingNavigator};
use customfit_booking::validation::APPOINTMENT_TIME;
use customfit_booking::{
    BookingConfig, BookingController, LocalClock, PageHandles, ReqwestTransport, Scheduler,
    Services, SubmitDisposition, TokioScheduler, Transport,
};
use std::rc::Rc;

/// Must run inside a `LocalSet`
pub async fn handle(
    args: &BookingArgs,
    settings: &BookingConfig,
    base_url: &str,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let transport = Rc::new(ReqwestTransport::with_base_url(base_url));
    let report = run(args, settings, transport, Rc::new(TokioScheduler)).await;
    let accepted = report.outcome == "accepted";
    format.print(&[report]);
    Ok(accepted)
}

async fn run(
    args: &BookingArgs,
    settings: &BookingConfig,
    transport: Rc<dyn Transport>,
    scheduler: Rc<dyn Scheduler>,
) -> Report {
    let form = Rc::new(super::booking_form(args));
    let controller = BookingController::new(
        settings.clone(),
        PageHandles {
            form: form.clone(),
            banner: Rc::new(MemoryBanner::new()),
            navigator: Rc::new(RecordingNavigator::new()),
        },
        Services {
            transport,
            scheduler,
            clock: Rc::new(LocalClock),
        },
    );

    // the page runs the time guard when the field changes, before any submit
    if let Some(input) = form.input(APPOINTMENT_TIME) {
        if !controller.handle_time_change(&*input) {
            let message = controller.banner().message();
            tracing::warn!(time = %args.time, "appointment time cleared");
            return Report::new("invalid", message);
        }
    }

    let disposition = controller.handle_submit().await;
    if let SubmitDisposition::Redirected(url) = &disposition {
        tracing::debug!(%url, "server accepted booking");
    }
    Report::from(&disposition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::args;
    use async_trait::async_trait;
    use customfit_booking::{FormPayload, ManualScheduler, TransportError, TransportResponse};
    use std::cell::RefCell;

    struct StubTransport {
        response: Result<TransportResponse, TransportError>,
        posted: RefCell<Vec<FormPayload>>,
    }

    impl StubTransport {
        fn new(response: Result<TransportResponse, TransportError>) -> Rc<Self> {
            Rc::new(Self {
                response,
                posted: RefCell::new(Vec::new()),
            })
        }
    }

    #[async_trait(?Send)]
    impl Transport for StubTransport {
        async fn post_form(
            &self,
            _url: &str,
            payload: &FormPayload,
        ) -> Result<TransportResponse, TransportError> {
            self.posted.borrow_mut().push(payload.clone());
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_accepted_booking_reports_redirect() {
        let transport = StubTransport::new(Ok(TransportResponse::new(200, r#"{"success": true}"#)));
        let report = run(
            &args("2999-01-04", "10:30"),
            &BookingConfig::default(),
            transport.clone(),
            Rc::new(ManualScheduler::new()),
        )
        .await;

        assert_eq!(report.outcome, "accepted");
        assert_eq!(report.redirect, "/?success=1");
        let posted = transport.posted.borrow();
        assert_eq!(posted[0].get("tailor_id"), Some("7"));
    }

    #[tokio::test]
    async fn test_server_errors_reported() {
        let transport = StubTransport::new(Ok(TransportResponse::new(
            422,
            r#"{"errors": ["Tailor unavailable", "Slot taken"]}"#,
        )));
        let report = run(
            &args("2999-01-04", "10:30"),
            &BookingConfig::default(),
            transport,
            Rc::new(ManualScheduler::new()),
        )
        .await;

        assert_eq!(report.outcome, "rejected");
        assert_eq!(report.message, "Tailor unavailable, Slot taken");
    }

    #[tokio::test]
    async fn test_time_guard_stops_before_posting() {
        let transport = StubTransport::new(Ok(TransportResponse::new(200, "{}")));
        let report = run(
            &args("2999-01-04", "07:15"),
            &BookingConfig::default(),
            transport.clone(),
            Rc::new(ManualScheduler::new()),
        )
        .await;

        assert_eq!(report.outcome, "invalid");
        assert_eq!(report.message, "Please select a time between 9 AM and 6 PM");
        assert!(transport.posted.borrow().is_empty());
    }
}
