//! Page bootstrap and event wiring

use crate::dom::{WebBanner, WebForm, WebNavigator, WebTimeInput};
use crate::timers::GlooScheduler;
use crate::{config_from_inline, CONFIG_ELEMENT_ID};
use customfit_booking::validation::APPOINTMENT_TIME;
use customfit_booking::{
    BookingController, LocalClock, PageHandles, ReqwestTransport, Services, SubmissionUi,
};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, HtmlFormElement, HtmlInputElement, Window};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    if document.ready_state() != "loading" {
        return attach(&window, &document);
    }

    let on_ready = {
        let window = window.clone();
        let document = document.clone();
        Closure::<dyn FnMut(Event)>::once(move |_: Event| {
            if let Err(e) = attach(&window, &document) {
                tracing::error!(?e, "booking page setup failed");
            }
        })
    };
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

fn attach(window: &Window, document: &Document) -> Result<(), JsValue> {
    let forms = document.query_selector_all("form")?;
    tracing::info!(forms = forms.length(), "attaching form handlers");

    // first form is the booking form; the controller manages its busy state
    for index in 1..forms.length() {
        let Some(form) = forms
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlFormElement>().ok())
        else {
            continue;
        };
        attach_busy_handler(form, document.clone())?;
    }

    let Some(booking_form) = forms
        .item(0)
        .and_then(|node| node.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(());
    };

    let config = config_from_inline(
        document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .as_deref(),
    );
    let banner = WebBanner::attach(document, &booking_form)?;
    let origin = window.location().origin()?;

    let controller = Rc::new(BookingController::new(
        config,
        PageHandles {
            form: Rc::new(WebForm::new(booking_form.clone(), document.clone())),
            banner: Rc::new(banner),
            navigator: Rc::new(WebNavigator::new(window.clone())),
        },
        Services {
            transport: Rc::new(ReqwestTransport::with_base_url(origin)),
            scheduler: Rc::new(GlooScheduler),
            clock: Rc::new(LocalClock),
        },
    ));

    attach_booking_handler(&booking_form, Rc::clone(&controller))?;
    attach_time_guard(document, controller)?;
    Ok(())
}

fn attach_busy_handler(form: HtmlFormElement, document: Document) -> Result<(), JsValue> {
    let target = form.clone();
    let surface = WebForm::new(form, document);
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        // native submission navigates away; busy state is never undone
        let _ = SubmissionUi::engage(&surface);
    });
    target.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

fn attach_booking_handler(
    form: &HtmlFormElement,
    controller: Rc<BookingController>,
) -> Result<(), JsValue> {
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let controller = Rc::clone(&controller);
        spawn_local(async move {
            let disposition = controller.handle_submit().await;
            tracing::debug!(?disposition, "booking submit finished");
        });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

fn attach_time_guard(document: &Document, controller: Rc<BookingController>) -> Result<(), JsValue> {
    let Some(input) = document
        .get_element_by_id(APPOINTMENT_TIME)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        tracing::debug!("no appointment time input on page");
        return Ok(());
    };

    let target = input.clone();
    let time_input = WebTimeInput::new(input);
    let on_change = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        controller.handle_time_change(&time_input);
    });
    target.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}
