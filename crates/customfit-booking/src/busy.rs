//! Submit button busy state

use crate::dom::{FormSurface, SubmitControl};
use std::rc::Rc;

/// Spinner shown in place of the button label
pub const SPINNER_SVG: &str = concat!(
    r#"<svg class="animate-spin -ml-1 mr-3 h-5 w-5 inline-block" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">"#,
    r#"<circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>"#,
    r#"<path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"></path>"#,
    "</svg>",
);

pub const BUSY_TEXT: &str = "Processing...";

/// Full busy label markup
pub fn busy_label() -> String {
    format!("{} {}", SPINNER_SVG, BUSY_TEXT)
}

/// A disabled, relabelled submit control. Dropping it leaves the control
/// busy; call [`BusyState::restore`] to undo.
pub struct BusyState {
    control: Rc<dyn SubmitControl>,
    original_label: String,
}

impl BusyState {
    pub fn engage(control: Rc<dyn SubmitControl>) -> Self {
        let original_label = control.label();
        control.set_disabled(true);
        control.set_label(&busy_label());
        Self {
            control,
            original_label,
        }
    }

    pub fn original_label(&self) -> &str {
        &self.original_label
    }

    pub fn restore(self) {
        self.control.set_label(&self.original_label);
        self.control.set_disabled(false);
    }
}

/// Busy-state handler registered on every form
#[derive(Debug, Default, Clone, Copy)]
pub struct SubmissionUi;

impl SubmissionUi {
    /// No-op when the form has no submit control
    pub fn engage<F: FormSurface + ?Sized>(form: &F) -> Option<BusyState> {
        let control = form.submit_control()?;
        tracing::debug!("submit control busy");
        Some(BusyState::engage(control))
    }
}
