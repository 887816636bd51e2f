//! Client core for the calculations service.
//!
//! Everything here is frontend-agnostic: HTTP goes through [`HttpTransport`],
//! the token through [`calc_storage::TokenStore`], and rendering through
//! [`Ui`]. The browser and terminal frontends only supply those three.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod session;
pub mod transport;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, Endpoint, Session};
pub use app::CalcApp;
pub use config::ClientConfig;
pub use error::ClientError;
pub use form::{FormController, FormInput, FormMode, FormView, SubmitOutcome};
pub use list::{CalculationRow, ListView};
pub use session::SessionManager;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use ui::{AuthForm, Panel, ToastKind, Ui, UiEvent};
