//! Page abstraction
//!
//! The controller never touches a document directly. Each trait covers one
//! element role:
//! - banner region for errors
//! - submit control of a form
//! - form surfaces (any form, and the booking form)
//! - time input, navigator
//!
//! All methods take `&self`; implementations use interior mutability the way
//! DOM handles do. Nothing here is `Send`.

use crate::transport::FormPayload;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Region that displays the current error
pub trait BannerHost {
    fn set_message(&self, message: &str);
    fn set_hidden(&self, hidden: bool);
    fn message(&self) -> String;
    fn is_hidden(&self) -> bool;
}

/// A form's `type="submit"` button
pub trait SubmitControl {
    /// Current displayed content (markup)
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
    fn is_disabled(&self) -> bool;
}

/// Any form on the page
pub trait FormSurface {
    fn submit_control(&self) -> Option<Rc<dyn SubmitControl>>;
}

/// The primary booking form
pub trait BookingFormSurface: FormSurface {
    /// Value of the input with this id, `None` if absent
    fn field_value(&self, id: &str) -> Option<String>;

    /// Every named field of the form, in document order
    fn form_data(&self) -> FormPayload;
}

/// The appointment time input
pub trait TimeInput {
    fn value(&self) -> String;
    fn clear(&self);
}

/// Full-page navigation
pub trait Navigator {
    fn navigate(&self, url: &str);
}

// =============================================================================
// In-memory page (headless hosts and tests)
// =============================================================================

/// Banner backed by plain fields. Starts hidden and empty.
#[derive(Debug)]
pub struct MemoryBanner {
    message: RefCell<String>,
    hidden: Cell<bool>,
}

impl MemoryBanner {
    pub fn new() -> Self {
        Self {
            message: RefCell::new(String::new()),
            hidden: Cell::new(true),
        }
    }

    /// Message if the banner is showing
    pub fn visible_message(&self) -> Option<String> {
        (!self.hidden.get()).then(|| self.message.borrow().clone())
    }
}

impl Default for MemoryBanner {
    fn default() -> Self {
        Self::new()
    }
}

impl BannerHost for MemoryBanner {
    fn set_message(&self, message: &str) {
        *self.message.borrow_mut() = message.to_string();
    }

    fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    fn message(&self) -> String {
        self.message.borrow().clone()
    }

    fn is_hidden(&self) -> bool {
        self.hidden.get()
    }
}

#[derive(Debug)]
pub struct MemoryButton {
    label: RefCell<String>,
    disabled: Cell<bool>,
}

impl MemoryButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: RefCell::new(label.into()),
            disabled: Cell::new(false),
        }
    }
}

impl SubmitControl for MemoryButton {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_string();
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }
}

/// Named text input
#[derive(Debug)]
pub struct MemoryInput {
    name: String,
    value: RefCell<String>,
}

impl MemoryInput {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: RefCell::new(value.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.value.borrow_mut() = value.into();
    }
}

impl TimeInput for MemoryInput {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn clear(&self) {
        self.value.borrow_mut().clear();
    }
}

/// Form whose inputs double as its named fields (id == name)
#[derive(Debug, Default)]
pub struct MemoryForm {
    inputs: RefCell<Vec<Rc<MemoryInput>>>,
    button: Option<Rc<MemoryButton>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form with a submit button carrying `label`
    pub fn with_submit_button(label: impl Into<String>) -> Self {
        Self {
            inputs: RefCell::new(Vec::new()),
            button: Some(Rc::new(MemoryButton::new(label))),
        }
    }

    /// Set a field, adding the input if the form lacks it
    pub fn set_field(&self, name: &str, value: impl Into<String>) {
        match self.input(name) {
            Some(input) => input.set_value(value),
            None => self
                .inputs
                .borrow_mut()
                .push(Rc::new(MemoryInput::new(name, value))),
        }
    }

    pub fn input(&self, name: &str) -> Option<Rc<MemoryInput>> {
        self.inputs
            .borrow()
            .iter()
            .find(|input| input.name() == name)
            .cloned()
    }

    pub fn button(&self) -> Option<Rc<MemoryButton>> {
        self.button.clone()
    }
}

impl FormSurface for MemoryForm {
    fn submit_control(&self) -> Option<Rc<dyn SubmitControl>> {
        self.button
            .as_ref()
            .map(|button| Rc::clone(button) as Rc<dyn SubmitControl>)
    }
}

impl BookingFormSurface for MemoryForm {
    fn field_value(&self, id: &str) -> Option<String> {
        self.input(id).map(|input| input.value())
    }

    fn form_data(&self) -> FormPayload {
        self.inputs
            .borrow()
            .iter()
            .map(|input| (input.name().to_string(), input.value()))
            .collect()
    }
}

/// Navigator that records instead of leaving the page
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visits.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        tracing::debug!(url, "navigation recorded");
        self.visits.borrow_mut().push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_form_fields_in_insertion_order() {
        let form = MemoryForm::new();
        form.set_field("name", "Ada");
        form.set_field("chest", "40");
        form.set_field("name", "Grace");

        assert_eq!(form.field_value("name").as_deref(), Some("Grace"));
        assert_eq!(form.field_value("missing"), None);
        let data = form.form_data();
        let names: Vec<_> = data.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["name", "chest"]);
    }

    #[test]
    fn test_form_without_button() {
        assert!(MemoryForm::new().submit_control().is_none());
        assert!(MemoryForm::with_submit_button("Go").submit_control().is_some());
    }

    #[test]
    fn test_input_clear() {
        let input = MemoryInput::new("appointment_time", "20:00");
        input.clear();
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_banner_visibility() {
        let banner = MemoryBanner::new();
        assert_eq!(banner.visible_message(), None);
        banner.set_message("oops");
        banner.set_hidden(false);
        assert_eq!(banner.visible_message().as_deref(), Some("oops"));
    }
}
