//! DOM implementation of [`Ui`].

use std::cell::RefCell;

use async_trait::async_trait;
use calc_api_types::UserProfile;
use calc_client::{AuthForm, FormMode, FormView, ListView, Panel, ToastKind, Ui};
use gloo_timers::callback::Timeout;
use gloo_utils::window;

use crate::dom::{self, Elements};

const TOAST_MILLIS: u32 = 3_000;

pub struct DomUi {
    els: Elements,
    toast_timer: RefCell<Option<Timeout>>,
}

impl DomUi {
    pub fn new(els: Elements) -> Self {
        Self {
            els,
            toast_timer: RefCell::new(None),
        }
    }
}

#[async_trait(?Send)]
impl Ui for DomUi {
    fn show_panel(&self, panel: Panel) {
        let (shown, hidden) = match panel {
            Panel::Auth => (&self.els.auth_section, &self.els.app_section),
            Panel::App => (&self.els.app_section, &self.els.auth_section),
        };
        dom::hide(hidden);
        dom::show(shown);
    }

    fn show_auth_form(&self, form: AuthForm) {
        let (shown, hidden) = match form {
            AuthForm::Login => (&self.els.login_panel, &self.els.register_panel),
            AuthForm::Register => (&self.els.register_panel, &self.els.login_panel),
        };
        dom::hide(hidden);
        dom::show(shown);
    }

    fn show_welcome(&self, user: &UserProfile) {
        dom::set_text(
            &self.els.username_display,
            &format!("Welcome, {}!", user.username),
        );
    }

    fn show_toast(&self, message: &str, kind: ToastKind) {
        if let Some(line) = console_line(message, kind) {
            gloo_console::error!(line);
        }

        let toast = self.els.toast.clone();
        dom::set_text(&toast, message);
        toast.set_class_name(&format!("toast {} show", kind.as_str()));

        // Replacing the handle cancels the previous toast's timer.
        let timer = Timeout::new(TOAST_MILLIS, move || {
            let _ = toast.class_list().remove_1("show");
        });
        self.toast_timer.replace(Some(timer));
    }

    fn render_form(&self, view: &FormView) {
        let els = &self.els;
        els.calculation_id.set_value(&view.id);
        els.operand1.set_value(&view.fields.operand1);
        els.operand2.set_value(&view.fields.operand2);
        els.operation.set_value(&view.fields.operation);
        dom::set_text(&els.form_title, view.title);
        dom::set_text(&els.submit_btn, view.submit_label);
        dom::set_display(
            &els.cancel_btn,
            if view.cancel_visible { "inline-block" } else { "none" },
        );

        if matches!(view.mode, FormMode::Editing(_)) {
            els.calculation_form.scroll_into_view();
        }
    }

    fn render_list(&self, view: &ListView) {
        self.els.calculations_list.set_inner_html(&list_html(view));
    }

    fn reset_login_form(&self) {
        self.els.login_form.reset();
    }

    fn reset_register_form(&self) {
        self.els.register_form.reset();
    }

    async fn confirm(&self, message: &str) -> bool {
        window().confirm_with_message(message).unwrap_or(false)
    }
}

/// Markup for the list container. Edit and delete buttons carry
/// `data-action`/`data-id`, picked up by the delegated click handler.
pub fn list_html(view: &ListView) -> String {
    let rows = match view {
        ListView::Items(rows) => rows,
        other => {
            let class = match other {
                ListView::Loading => "loading",
                ListView::Empty => "empty-state",
                _ => "error",
            };
            let message = other.message().unwrap_or_default();
            return format!(r#"<p class="{class}">{}</p>"#, escape_html(&message));
        }
    };

    rows.iter()
        .map(|row| {
            format!(
                r#"<div class="calculation-item" data-id="{id}">
    <div class="calculation-info">
        <div class="calculation-expression">{expression}</div>
        <div class="calculation-result">= {result}</div>
        <div class="calculation-meta">{meta}</div>
    </div>
    <div class="calculation-actions">
        <button type="button" class="btn btn-success" data-action="edit" data-id="{id}">Edit</button>
        <button type="button" class="btn btn-danger" data-action="delete" data-id="{id}">Delete</button>
    </div>
</div>"#,
                id = row.id,
                expression = escape_html(&row.expression),
                result = escape_html(&row.result),
                meta = escape_html(&row.meta()),
            )
        })
        .collect()
}

/// Console mirror of error toasts, local validation failures included.
fn console_line(message: &str, kind: ToastKind) -> Option<String> {
    (kind == ToastKind::Error).then(|| format!("calc error: {message}"))
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
