//! Event binding.
//!
//! Each listener turns a DOM event into a [`UiEvent`] and hands it to the
//! app on a spawned local task.

use std::rc::Rc;

use calc_client::{FormInput, UiEvent};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget};

use crate::App;
use crate::dom::Elements;

/// Attach `to_event` to `target`. When it yields an event the default action
/// is suppressed and the app handles the event asynchronously.
fn dispatch<F>(app: &Rc<App>, target: &EventTarget, kind: &str, to_event: F) -> Result<(), JsValue>
where
    F: Fn(&Event) -> Option<UiEvent> + 'static,
{
    let app = app.clone();
    let cb = Closure::wrap(Box::new(move |e: Event| {
        let Some(event) = to_event(&e) else {
            return;
        };
        e.prevent_default();
        let app = app.clone();
        wasm_bindgen_futures::spawn_local(async move {
            app.handle(event).await;
        });
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Bind all listeners. Call once after the elements are resolved.
pub fn bind_events(els: &Elements, app: &Rc<App>) -> Result<(), JsValue> {
    // ── Auth ──
    dispatch(app, &els.show_register, "click", |_| Some(UiEvent::ShowRegister))?;
    dispatch(app, &els.show_login, "click", |_| Some(UiEvent::ShowLogin))?;

    let e = els.clone();
    dispatch(app, &els.register_form, "submit", move |_| {
        Some(UiEvent::Register {
            username: e.register_username.value(),
            email: e.register_email.value(),
            password: e.register_password.value(),
        })
    })?;

    let e = els.clone();
    dispatch(app, &els.login_form, "submit", move |_| {
        Some(UiEvent::Login {
            username: e.login_username.value(),
            password: e.login_password.value(),
        })
    })?;

    dispatch(app, &els.logout_btn, "click", |_| Some(UiEvent::Logout))?;

    // ── Calculation form ──
    let e = els.clone();
    dispatch(app, &els.calculation_form, "submit", move |_| {
        Some(UiEvent::Submit(FormInput::new(
            &e.operand1.value(),
            &e.operand2.value(),
            &e.operation.value(),
        )))
    })?;

    dispatch(app, &els.cancel_btn, "click", |_| Some(UiEvent::Cancel))?;

    // ── List ──
    dispatch(app, &els.refresh_btn, "click", |_| Some(UiEvent::Refresh))?;
    dispatch(app, &els.calculations_list, "click", list_action)?;

    if let Some(btn) = &els.health_btn {
        dispatch(app, btn, "click", |_| Some(UiEvent::Health))?;
    }

    Ok(())
}

/// Delegated handler for the per-row edit/delete buttons.
fn list_action(event: &Event) -> Option<UiEvent> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let button = target.closest("[data-action]").ok()??;
    let id: i64 = button.get_attribute("data-id")?.parse().ok()?;
    match button.get_attribute("data-action")?.as_str() {
        "edit" => Some(UiEvent::Edit(id)),
        "delete" => Some(UiEvent::Delete(id)),
        _ => None,
    }
}
