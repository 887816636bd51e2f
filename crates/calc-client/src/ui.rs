//! Rendering seam and the events that drive [`crate::CalcApp`].

use async_trait::async_trait;
use calc_api_types::UserProfile;

use crate::form::{FormInput, FormView};
use crate::list::ListView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Auth,
    App,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

/// What a frontend has to draw. Implementations must not call back into the
/// app; user input comes back in as [`UiEvent`]s.
#[async_trait(?Send)]
pub trait Ui {
    fn show_panel(&self, panel: Panel);
    fn show_auth_form(&self, form: AuthForm);
    fn show_welcome(&self, user: &UserProfile);
    fn show_toast(&self, message: &str, kind: ToastKind);
    fn render_form(&self, view: &FormView);
    fn render_list(&self, view: &ListView);
    fn reset_login_form(&self);
    fn reset_register_form(&self);
    async fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ShowLogin,
    ShowRegister,
    Register {
        username: String,
        email: String,
        password: String,
    },
    Login {
        username: String,
        password: String,
    },
    Logout,
    Submit(FormInput),
    Edit(i64),
    Cancel,
    Delete(i64),
    Refresh,
    Health,
}

impl UiEvent {
    /// Stable name for logging; never includes field values.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::ShowLogin => "show_login",
            UiEvent::ShowRegister => "show_register",
            UiEvent::Register { .. } => "register",
            UiEvent::Login { .. } => "login",
            UiEvent::Logout => "logout",
            UiEvent::Submit(_) => "submit",
            UiEvent::Edit(_) => "edit",
            UiEvent::Cancel => "cancel",
            UiEvent::Delete(_) => "delete",
            UiEvent::Refresh => "refresh",
            UiEvent::Health => "health",
        }
    }
}
