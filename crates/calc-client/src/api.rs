//! Authenticated API client.
//!
//! Wraps the transport for JSON requests to the calculations service,
//! injects the bearer header and turns non-2xx replies into [`ClientError`].

use calc_api_types::{
    Calculation, CalculationRequest, ErrorBody, HealthResponse, RegisterRequest, TokenResponse,
    UserProfile,
};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

pub const REQUEST_FAILED: &str = "Request failed";
pub const LOGIN_FAILED: &str = "Login failed";

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Every path the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Token,
    CurrentUser,
    Calculations,
    Calculation(i64),
    Health,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Register => "/register".to_string(),
            Endpoint::Token => "/token".to_string(),
            Endpoint::CurrentUser => "/users/me".to_string(),
            Endpoint::Calculations => "/calculations".to_string(),
            Endpoint::Calculation(id) => format!("/calculations/{id}"),
            Endpoint::Health => "/health".to_string(),
        }
    }

    /// Credential exchange and registration happen before there is a
    /// session; they must never carry `Authorization`.
    pub fn is_public(&self) -> bool {
        match self {
            Endpoint::Register | Endpoint::Token => true,
            Endpoint::CurrentUser
            | Endpoint::Calculations
            | Endpoint::Calculation(_)
            | Endpoint::Health => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

pub struct ApiClient<T> {
    config: ClientConfig,
    transport: T,
    session: RefCell<Session>,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            session: RefCell::new(Session::default()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().token.clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        self.session.borrow_mut().token = token;
    }

    pub fn set_user(&self, user: Option<UserProfile>) {
        self.session.borrow_mut().user = user;
    }

    pub fn clear_session(&self) {
        *self.session.borrow_mut() = Session::default();
    }

    /// Send `body` as JSON to `endpoint`.
    ///
    /// Resolves to `None` on `204 No Content`; any non-2xx status fails with
    /// [`ClientError::Request`] carrying the server's `detail`.
    pub async fn request(
        &self,
        endpoint: Endpoint,
        method: HttpMethod,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        let body = body.map(|b| b.to_string());
        let response = self.send(endpoint, method, body.map(|b| (JSON, b))).await?;

        if !response.is_success() {
            let message = error_message(&response, REQUEST_FAILED);
            warn!(
                status = response.status,
                path = %endpoint.path(),
                "api error: {message}"
            );
            return Err(ClientError::Request {
                status: response.status,
                message,
            });
        }

        if response.status == 204 || response.body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        method: HttpMethod,
        body: Option<(&str, String)>,
    ) -> Result<HttpResponse, ClientError> {
        let mut request = HttpRequest::new(method, self.config.url(&endpoint.path()));

        if let Some((content_type, body)) = body {
            request
                .headers
                .push(("Content-Type".to_string(), content_type.to_string()));
            request.body = Some(body);
        }

        if !endpoint.is_public() {
            if let Some(token) = self.token() {
                request
                    .headers
                    .push(("Authorization".to_string(), format!("Bearer {token}")));
            }
        }

        debug!(method = method.as_str(), url = %request.url, "api request");

        self.transport.send(request).await.map_err(|err| {
            warn!(path = %endpoint.path(), "api transport error: {err}");
            ClientError::from(err)
        })
    }

    /// `POST /token` with a form-encoded body.
    pub async fn exchange_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError> {
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("username", username)
            .append_pair("password", password)
            .finish();

        let response = self
            .send(Endpoint::Token, HttpMethod::Post, Some((FORM, form)))
            .await?;

        if !response.is_success() {
            let message = error_message(&response, LOGIN_FAILED);
            warn!(status = response.status, "login rejected: {message}");
            return Err(ClientError::Auth(message));
        }

        serde_json::from_str(&response.body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ClientError> {
        let body = to_value(request)?;
        let value = self
            .request(Endpoint::Register, HttpMethod::Post, Some(&body))
            .await
            .map_err(|err| match err {
                ClientError::Request { message, .. } => ClientError::Auth(message),
                other => other,
            })?;
        decode(value)
    }

    pub async fn current_user(&self) -> Result<UserProfile, ClientError> {
        decode(
            self.request(Endpoint::CurrentUser, HttpMethod::Get, None)
                .await?,
        )
    }

    pub async fn list_calculations(&self) -> Result<Vec<Calculation>, ClientError> {
        decode(
            self.request(Endpoint::Calculations, HttpMethod::Get, None)
                .await?,
        )
    }

    pub async fn get_calculation(&self, id: i64) -> Result<Calculation, ClientError> {
        decode(
            self.request(Endpoint::Calculation(id), HttpMethod::Get, None)
                .await?,
        )
    }

    pub async fn create_calculation(
        &self,
        request: &CalculationRequest,
    ) -> Result<Calculation, ClientError> {
        let body = to_value(request)?;
        decode(
            self.request(Endpoint::Calculations, HttpMethod::Post, Some(&body))
                .await?,
        )
    }

    pub async fn update_calculation(
        &self,
        id: i64,
        request: &CalculationRequest,
    ) -> Result<Calculation, ClientError> {
        let body = to_value(request)?;
        decode(
            self.request(Endpoint::Calculation(id), HttpMethod::Put, Some(&body))
                .await?,
        )
    }

    pub async fn delete_calculation(&self, id: i64) -> Result<(), ClientError> {
        self.request(Endpoint::Calculation(id), HttpMethod::Delete, None)
            .await?;
        Ok(())
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        decode(self.request(Endpoint::Health, HttpMethod::Get, None).await?)
    }
}

/// `detail` from a structured error body, else `fallback`.
pub fn error_message(response: &HttpResponse, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message())
        .unwrap_or_else(|| fallback.to_string())
}

fn to_value<S: serde::Serialize>(value: &S) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

fn decode<D: DeserializeOwned>(value: Option<serde_json::Value>) -> Result<D, ClientError> {
    let value = value.ok_or_else(|| ClientError::Decode("empty response body".to_string()))?;
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, calculation_json};
    use calc_api_types::Operation;
    use std::rc::Rc;

    fn client(transport: &Rc<MockTransport>) -> ApiClient<Rc<MockTransport>> {
        ApiClient::new(ClientConfig::new("http://api.test"), transport.clone())
    }

    #[test]
    fn only_token_and_register_are_public() {
        assert!(Endpoint::Token.is_public());
        assert!(Endpoint::Register.is_public());
        assert!(!Endpoint::CurrentUser.is_public());
        assert!(!Endpoint::Calculations.is_public());
        assert!(!Endpoint::Calculation(7).is_public());
        assert!(!Endpoint::Health.is_public());
        assert_eq!(Endpoint::Calculation(7).path(), "/calculations/7");
    }

    #[tokio::test]
    async fn bearer_header_is_attached_when_token_held() {
        let transport = Rc::new(MockTransport::default());
        transport.push_json(200, serde_json::json!([]));
        let api = client(&transport);
        api.set_token(Some("tok-1".to_string()));

        api.list_calculations().await.unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "http://api.test/calculations");
        assert_eq!(sent.header("authorization"), Some("Bearer tok-1"));
        assert_eq!(sent.body, None);
    }

    #[tokio::test]
    async fn no_bearer_header_without_token() {
        let transport = Rc::new(MockTransport::default());
        transport.push_json(200, serde_json::json!([]));
        let api = client(&transport);

        api.list_calculations().await.unwrap();

        assert_eq!(transport.last_request().unwrap().header("Authorization"), None);
    }

    #[tokio::test]
    async fn public_endpoints_never_carry_bearer() {
        let transport = Rc::new(MockTransport::default());
        transport.push_json(
            200,
            serde_json::json!({ "access_token": "fresh", "token_type": "bearer" }),
        );
        transport.push_json(
            201,
            serde_json::json!({ "id": 2, "username": "bob", "email": "bob@example.com" }),
        );
        let api = client(&transport);
        api.set_token(Some("stale".to_string()));

        api.exchange_credentials("alice", "pw").await.unwrap();
        api.register(&RegisterRequest {
            username: "bob".into(),
            email: "bob@example.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

        for request in transport.requests() {
            assert_eq!(request.header("Authorization"), None, "{}", request.url);
        }
    }

    #[tokio::test]
    async fn credential_exchange_is_form_encoded() {
        let transport = Rc::new(MockTransport::default());
        transport.push_json(200, serde_json::json!({ "access_token": "t" }));
        let api = client(&transport);

        let token = api.exchange_credentials("al ice", "p&w").await.unwrap();

        assert_eq!(token.access_token, "t");
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "http://api.test/token");
        assert_eq!(
            sent.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(sent.body.as_deref(), Some("username=al+ice&password=p%26w"));
    }

    #[tokio::test]
    async fn error_message_comes_from_detail() {
        let transport = Rc::new(MockTransport::default());
        transport.push_json(404, serde_json::json!({ "detail": "Calculation not found" }));
        let api = client(&transport);

        let err = api.get_calculation(99).await.unwrap_err();

        assert_eq!(
            err,
            ClientError::Request {
                status: 404,
                message: "Calculation not found".to_string()
            }
        );
        assert_eq!(err.to_string(), "Calculation not found");
    }

    #[tokio::test]
    async fn error_message_falls_back_without_detail() {
        let transport = Rc::new(MockTransport::default());
        transport.push_raw(502, "<html>bad gateway</html>");
        transport.push_json(500, serde_json::json!({ "error": "boom" }));
        let api = client(&transport);

        let first = api.list_calculations().await.unwrap_err();
        let second = api.list_calculations().await.unwrap_err();

        assert_eq!(first.to_string(), REQUEST_FAILED);
        assert_eq!(second.to_string(), REQUEST_FAILED);
        assert_eq!(first.status(), Some(502));
    }

    #[tokio::test]
    async fn login_rejection_is_auth_error() {
        let transport = Rc::new(MockTransport::default());
        transport.push_json(
            401,
            serde_json::json!({ "detail": "Incorrect username or password" }),
        );
        transport.push_raw(401, "");
        let api = client(&transport);

        let with_detail = api.exchange_credentials("alice", "nope").await.unwrap_err();
        let without_detail = api.exchange_credentials("alice", "nope").await.unwrap_err();

        assert_eq!(
            with_detail,
            ClientError::Auth("Incorrect username or password".to_string())
        );
        assert_eq!(without_detail, ClientError::Auth(LOGIN_FAILED.to_string()));
    }

    #[tokio::test]
    async fn registration_rejection_is_auth_error() {
        let transport = Rc::new(MockTransport::default());
        transport.push_json(400, serde_json::json!({ "detail": "Username already registered" }));
        let api = client(&transport);

        let err = api
            .register(&RegisterRequest {
                username: "alice".into(),
                email: "alice@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ClientError::Auth("Username already registered".to_string()));
    }

    #[tokio::test]
    async fn no_content_resolves_to_none() {
        let transport = Rc::new(MockTransport::default());
        transport.push_raw(204, "");
        let api = client(&transport);
        api.set_token(Some("t".into()));

        let value = api
            .request(Endpoint::Calculation(4), HttpMethod::Delete, None)
            .await
            .unwrap();

        assert_eq!(value, None);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Delete);
        assert_eq!(sent.url, "http://api.test/calculations/4");
    }

    #[tokio::test]
    async fn update_sends_json_body() {
        let transport = Rc::new(MockTransport::default());
        transport.push_json(200, calculation_json(5, 20.0, 3.0, "multiply", 60.0));
        let api = client(&transport);
        api.set_token(Some("t".into()));

        let calc = api
            .update_calculation(
                5,
                &CalculationRequest {
                    operand1: 20.0,
                    operand2: 3.0,
                    operation: Operation::Multiply,
                },
            )
            .await
            .unwrap();

        assert_eq!(calc.result, 60.0);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "operand1": 20.0, "operand2": 3.0, "operation": "multiply" })
        );
    }

    #[tokio::test]
    async fn transport_failure_is_reported_verbatim() {
        let transport = Rc::new(MockTransport::default());
        transport.push_failure("Failed to fetch");
        let api = client(&transport);

        let err = api.health().await.unwrap_err();

        assert_eq!(err, ClientError::Transport("Failed to fetch".to_string()));
        assert_eq!(err.to_string(), "Failed to fetch");
    }
}
