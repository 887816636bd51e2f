//! DOM element bindings.
//!
//! Every element the UI touches is resolved once at startup. A missing
//! required element aborts startup with its id in the error.

use gloo_utils::document;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_display(el: &HtmlElement, display: &str) {
    let _ = el.style().set_property("display", display);
}

pub fn show(el: &HtmlElement) {
    set_display(el, "block");
}

pub fn hide(el: &HtmlElement) {
    set_display(el, "none");
}

#[derive(Clone)]
pub struct Elements {
    // Panels
    pub auth_section: HtmlElement,
    pub app_section: HtmlElement,

    // Login / register
    pub login_panel: HtmlElement,
    pub register_panel: HtmlElement,
    pub login_form: HtmlFormElement,
    pub register_form: HtmlFormElement,
    pub login_username: HtmlInputElement,
    pub login_password: HtmlInputElement,
    pub register_username: HtmlInputElement,
    pub register_email: HtmlInputElement,
    pub register_password: HtmlInputElement,
    pub show_register: HtmlElement,
    pub show_login: HtmlElement,

    // Calculation form
    pub calculation_form: HtmlFormElement,
    pub calculation_id: HtmlInputElement,
    pub operand1: HtmlInputElement,
    pub operand2: HtmlInputElement,
    pub operation: HtmlSelectElement,
    pub form_title: Element,
    pub submit_btn: HtmlElement,
    pub cancel_btn: HtmlElement,

    // App chrome
    pub calculations_list: Element,
    pub username_display: Element,
    pub toast: Element,
    pub logout_btn: HtmlElement,
    pub refresh_btn: HtmlElement,

    // Optional
    pub base_url: Option<HtmlInputElement>,
    pub health_btn: Option<HtmlElement>,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_typed {
    ($ty:ty, $id:expr) => {
        by_id_typed::<$ty>($id).ok_or_else(|| {
            JsValue::from_str(&format!("missing {} #{}", stringify!($ty), $id))
        })?
    };
}

impl Elements {
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            auth_section: get_typed!(HtmlElement, "auth-section"),
            app_section: get_typed!(HtmlElement, "app-section"),

            login_panel: get_typed!(HtmlElement, "login-form"),
            register_panel: get_typed!(HtmlElement, "register-form"),
            login_form: get_typed!(HtmlFormElement, "loginForm"),
            register_form: get_typed!(HtmlFormElement, "registerForm"),
            login_username: get_typed!(HtmlInputElement, "login-username"),
            login_password: get_typed!(HtmlInputElement, "login-password"),
            register_username: get_typed!(HtmlInputElement, "register-username"),
            register_email: get_typed!(HtmlInputElement, "register-email"),
            register_password: get_typed!(HtmlInputElement, "register-password"),
            show_register: get_typed!(HtmlElement, "show-register"),
            show_login: get_typed!(HtmlElement, "show-login"),

            calculation_form: get_typed!(HtmlFormElement, "calculationForm"),
            calculation_id: get_typed!(HtmlInputElement, "calculation-id"),
            operand1: get_typed!(HtmlInputElement, "operand1"),
            operand2: get_typed!(HtmlInputElement, "operand2"),
            operation: get_typed!(HtmlSelectElement, "operation"),
            form_title: get_el!("form-title"),
            submit_btn: get_typed!(HtmlElement, "submit-btn"),
            cancel_btn: get_typed!(HtmlElement, "cancel-btn"),

            calculations_list: get_el!("calculations-list"),
            username_display: get_el!("username-display"),
            toast: get_el!("toast"),
            logout_btn: get_typed!(HtmlElement, "logout-btn"),
            refresh_btn: get_typed!(HtmlElement, "refresh-btn"),

            base_url: by_id_typed("baseUrl"),
            health_btn: by_id_typed("health-btn"),
        })
    }
}
