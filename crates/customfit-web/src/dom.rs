//! `web-sys` implementations of the page traits

use crate::{payload_from_entries, BANNER_CLASSES, BANNER_ID, HIDDEN_CLASS, SUBMIT_BUTTON_SELECTOR};
use customfit_booking::dom::{
    BannerHost, BookingFormSurface, FormSurface, Navigator, SubmitControl, TimeInput,
};
use customfit_booking::FormPayload;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, Window};

pub struct WebBanner {
    element: HtmlElement,
}

impl WebBanner {
    /// Reuse `#form-errors`, or create it as the first child of `form`
    pub fn attach(document: &Document, form: &HtmlFormElement) -> Result<Self, JsValue> {
        if let Some(existing) = document.get_element_by_id(BANNER_ID) {
            return Ok(Self {
                element: existing.dyn_into::<HtmlElement>()?,
            });
        }

        let element = document.create_element("div")?.dyn_into::<HtmlElement>()?;
        element.set_id(BANNER_ID);
        element.set_class_name(BANNER_CLASSES);
        form.insert_before(&element, form.first_child().as_ref())?;
        Ok(Self { element })
    }
}

impl BannerHost for WebBanner {
    fn set_message(&self, message: &str) {
        self.element.set_text_content(Some(message));
    }

    fn set_hidden(&self, hidden: bool) {
        let classes = self.element.class_list();
        let result = if hidden {
            classes.add_1(HIDDEN_CLASS)
        } else {
            classes.remove_1(HIDDEN_CLASS)
        };
        if let Err(e) = result {
            tracing::warn!(?e, "failed to toggle banner visibility");
        }
    }

    fn message(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn is_hidden(&self) -> bool {
        self.element.class_list().contains(HIDDEN_CLASS)
    }
}

pub struct WebSubmitButton {
    element: HtmlButtonElement,
}

impl SubmitControl for WebSubmitButton {
    fn label(&self) -> String {
        self.element.inner_html()
    }

    fn set_label(&self, label: &str) {
        self.element.set_inner_html(label);
    }

    fn set_disabled(&self, disabled: bool) {
        self.element.set_disabled(disabled);
    }

    fn is_disabled(&self) -> bool {
        self.element.disabled()
    }
}

pub struct WebForm {
    element: HtmlFormElement,
    document: Document,
}

impl WebForm {
    pub fn new(element: HtmlFormElement, document: Document) -> Self {
        Self { element, document }
    }
}

impl FormSurface for WebForm {
    fn submit_control(&self) -> Option<Rc<dyn SubmitControl>> {
        let element = self
            .element
            .query_selector(SUBMIT_BUTTON_SELECTOR)
            .ok()
            .flatten()?
            .dyn_into::<HtmlButtonElement>()
            .ok()?;
        Some(Rc::new(WebSubmitButton { element }))
    }
}

impl BookingFormSurface for WebForm {
    fn field_value(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()
            .map(|input| input.value())
    }

    /// Text entries of `FormData`; file entries are skipped
    fn form_data(&self) -> FormPayload {
        let entries = web_sys::FormData::new_with_form(&self.element)
            .and_then(|data| js_sys::try_iter(&data));
        let iter = match entries {
            Ok(Some(iter)) => iter,
            Ok(None) => return FormPayload::new(),
            Err(e) => {
                tracing::warn!(?e, "could not read form data");
                return FormPayload::new();
            }
        };
        payload_from_entries(iter.flatten().map(|entry| {
            let entry: js_sys::Array = entry.unchecked_into();
            (entry.get(0).as_string(), entry.get(1).as_string())
        }))
    }
}

pub struct WebTimeInput {
    element: HtmlInputElement,
}

impl WebTimeInput {
    pub fn new(element: HtmlInputElement) -> Self {
        Self { element }
    }
}

impl TimeInput for WebTimeInput {
    fn value(&self) -> String {
        self.element.value()
    }

    fn clear(&self) {
        self.element.set_value("");
    }
}

pub struct WebNavigator {
    window: Window,
}

impl WebNavigator {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Navigator for WebNavigator {
    fn navigate(&self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            tracing::error!(?e, url, "navigation failed");
        }
    }
}
