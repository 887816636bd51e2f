//! Recording doubles shared by the unit tests.

use async_trait::async_trait;
use calc_api_types::UserProfile;
use calc_storage::TokenStore;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::form::FormView;
use crate::list::ListView;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::ui::{AuthForm, Panel, ToastKind, Ui};

#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_raw(status, &body.to_string());
    }

    pub fn push_raw(&self, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_failure(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_string())))
    }
}

/// Every operation fails, like a full or unavailable disk.
#[derive(Debug, Default)]
pub struct FailingTokenStore;

impl TokenStore for FailingTokenStore {
    fn load_token(&self) -> anyhow::Result<Option<String>> {
        Err(anyhow::anyhow!("disk full"))
    }

    fn save_token(&self, _token: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("disk full"))
    }

    fn clear_token(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("disk full"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    Panel(Panel),
    AuthForm(AuthForm),
    Welcome(String),
    Toast(String, ToastKind),
    Form(FormView),
    List(ListView),
    ResetLogin,
    ResetRegister,
    Confirm(String),
}

pub struct RecordingUi {
    calls: RefCell<Vec<UiCall>>,
    confirm_answer: Cell<bool>,
}

impl Default for RecordingUi {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
        }
    }
}

impl RecordingUi {
    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.borrow().clone()
    }

    pub fn toasts(&self) -> Vec<(String, ToastKind)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                UiCall::Toast(message, kind) => Some((message.clone(), *kind)),
                _ => None,
            })
            .collect()
    }

    pub fn last_panel(&self) -> Option<Panel> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            UiCall::Panel(panel) => Some(*panel),
            _ => None,
        })
    }

    pub fn last_list(&self) -> Option<ListView> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            UiCall::List(view) => Some(view.clone()),
            _ => None,
        })
    }

    pub fn last_form(&self) -> Option<FormView> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            UiCall::Form(view) => Some(view.clone()),
            _ => None,
        })
    }

    fn record(&self, call: UiCall) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl Ui for RecordingUi {
    fn show_panel(&self, panel: Panel) {
        self.record(UiCall::Panel(panel));
    }

    fn show_auth_form(&self, form: AuthForm) {
        self.record(UiCall::AuthForm(form));
    }

    fn show_welcome(&self, user: &UserProfile) {
        self.record(UiCall::Welcome(user.username.clone()));
    }

    fn show_toast(&self, message: &str, kind: ToastKind) {
        self.record(UiCall::Toast(message.to_string(), kind));
    }

    fn render_form(&self, view: &FormView) {
        self.record(UiCall::Form(view.clone()));
    }

    fn render_list(&self, view: &ListView) {
        self.record(UiCall::List(view.clone()));
    }

    fn reset_login_form(&self) {
        self.record(UiCall::ResetLogin);
    }

    fn reset_register_form(&self) {
        self.record(UiCall::ResetRegister);
    }

    async fn confirm(&self, message: &str) -> bool {
        self.record(UiCall::Confirm(message.to_string()));
        self.confirm_answer.get()
    }
}

pub fn calculation_json(
    id: i64,
    operand1: f64,
    operand2: f64,
    operation: &str,
    result: f64,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "operand1": operand1,
        "operand2": operand2,
        "operation": operation,
        "result": result,
        "user_id": 1,
        "created_at": "2024-05-01T10:00:00",
        "updated_at": "2024-05-01T10:00:00",
    })
}

pub fn profile_json(username: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "username": username,
        "email": format!("{username}@example.com"),
        "created_at": "2024-05-01T09:00:00",
    })
}
