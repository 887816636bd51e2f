//! Event dispatcher.
//!
//! Every [`UiEvent`] runs one handler to completion. State lives behind
//! `RefCell`s that are never held across an await, so a frontend may spawn
//! overlapping handlers (a double click on submit sends twice).

use calc_storage::TokenStore;
use tracing::debug;

use crate::error::ClientError;
use crate::form::{FormController, FormInput};
use crate::list::{self, DELETE_CONFIRMATION, DELETED_MESSAGE, ListView};
use crate::session::SessionManager;
use crate::transport::HttpTransport;
use crate::ui::{AuthForm, Panel, ToastKind, Ui, UiEvent};

pub const REGISTERED_MESSAGE: &str = "Registration successful! Please login.";
pub const LOGGED_IN_MESSAGE: &str = "Login successful!";
pub const LOGGED_OUT_MESSAGE: &str = "Logged out successfully";

pub struct CalcApp<T, S, U> {
    session: SessionManager<T, S>,
    form: FormController,
    ui: U,
}

impl<T, S, U> CalcApp<T, S, U>
where
    T: HttpTransport,
    S: TokenStore,
    U: Ui,
{
    pub fn new(session: SessionManager<T, S>, ui: U) -> Self {
        Self {
            session,
            form: FormController::new(),
            ui,
        }
    }

    pub fn session(&self) -> &SessionManager<T, S> {
        &self.session
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Startup: resume a persisted session if there is one.
    pub async fn start(&self) {
        self.ui.render_form(&self.form.view());
        if self.session.restore_session().await {
            self.enter_app();
            self.refresh().await;
        } else {
            self.ui.show_panel(Panel::Auth);
            self.ui.show_auth_form(AuthForm::Login);
        }
    }

    pub async fn handle(&self, event: UiEvent) {
        debug!(event = event.name(), "ui event");
        match event {
            UiEvent::ShowLogin => self.ui.show_auth_form(AuthForm::Login),
            UiEvent::ShowRegister => self.ui.show_auth_form(AuthForm::Register),
            UiEvent::Register {
                username,
                email,
                password,
            } => self.on_register(&username, &email, &password).await,
            UiEvent::Login { username, password } => self.on_login(&username, &password).await,
            UiEvent::Logout => self.on_logout(),
            UiEvent::Submit(input) => self.on_submit(input).await,
            UiEvent::Edit(id) => self.on_edit(id).await,
            UiEvent::Cancel => self.ui.render_form(&self.form.cancel()),
            UiEvent::Delete(id) => self.on_delete(id).await,
            UiEvent::Refresh => self.refresh().await,
            UiEvent::Health => self.on_health().await,
        }
    }

    /// Replace the rendered list with the server's current collection.
    pub async fn refresh(&self) {
        self.ui.render_list(&ListView::Loading);
        let view = list::load(self.session.api()).await;
        self.ui.render_list(&view);
    }

    async fn on_register(&self, username: &str, email: &str, password: &str) {
        match self.session.register(username, email, password).await {
            Ok(_) => {
                self.ui.show_toast(REGISTERED_MESSAGE, ToastKind::Success);
                self.ui.show_auth_form(AuthForm::Login);
                self.ui.reset_register_form();
            }
            Err(err) => self.report(&err),
        }
    }

    async fn on_login(&self, username: &str, password: &str) {
        match self.session.login(username, password).await {
            Ok(_) => {
                self.enter_app();
                self.ui.show_toast(LOGGED_IN_MESSAGE, ToastKind::Success);
                self.ui.reset_login_form();
                self.refresh().await;
            }
            Err(err) => self.report(&err),
        }
    }

    fn on_logout(&self) {
        self.session.logout();
        self.ui.show_panel(Panel::Auth);
        self.ui.render_list(&ListView::Loading);
        self.form.reset();
        self.ui.render_form(&self.form.view());
        self.ui.show_toast(LOGGED_OUT_MESSAGE, ToastKind::Info);
    }

    async fn on_submit(&self, input: FormInput) {
        match self.form.submit(self.session.api(), input).await {
            Ok(outcome) => {
                self.ui.show_toast(outcome.message(), ToastKind::Success);
                self.ui.render_form(&self.form.view());
                self.refresh().await;
            }
            Err(err) => self.report(&err),
        }
    }

    async fn on_edit(&self, id: i64) {
        match self.form.begin_edit(self.session.api(), id).await {
            Ok(view) => self.ui.render_form(&view),
            Err(err) => self.report(&err),
        }
    }

    async fn on_delete(&self, id: i64) {
        if !self.ui.confirm(DELETE_CONFIRMATION).await {
            return;
        }
        match self.session.api().delete_calculation(id).await {
            Ok(()) => {
                self.ui.show_toast(DELETED_MESSAGE, ToastKind::Success);
                self.refresh().await;
            }
            Err(err) => self.report(&err),
        }
    }

    async fn on_health(&self) {
        match self.session.api().health().await {
            Ok(health) => self
                .ui
                .show_toast(&format!("Service status: {}", health.status), ToastKind::Info),
            Err(err) => self.report(&err),
        }
    }

    fn enter_app(&self) {
        if let Some(user) = self.session.session().user {
            self.ui.show_welcome(&user);
        }
        self.ui.show_panel(Panel::App);
    }

    fn report(&self, err: &ClientError) {
        self.ui.show_toast(&err.to_string(), ToastKind::Error);
    }
}
