//! A local stand-in for the login service.
//!
//! It speaks the same contract as the real endpoint: rejected logins come
//! back as `200 {"error": ...}` rather than as an http error status.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};

use crate::data::{Credentials, ErrorBody, SessionBody};

pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";
const BODY_LIMIT: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct Account {
    pub credentials: Credentials,
    pub tobit_user_id: u64,
    pub person_id: String,
    pub access_token: String,
}

impl Account {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, password),
            tobit_user_id: 1234567,
            person_id: "123-45678".to_string(),
            access_token: "stub-access-token".to_string(),
        }
    }

    fn session(&self) -> SessionBody {
        SessionBody {
            tobit_user_id: self.tobit_user_id,
            person_id: self.person_id.clone(),
            tobit_access_token: self.access_token.clone(),
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Account::new("test@example.com", "password")
    }
}

type Accounts = Arc<Vec<Account>>;

pub fn router(accounts: Vec<Account>) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .with_state(Arc::new(accounts))
}

pub async fn run(listener: TcpListener, accounts: Vec<Account>) -> std::io::Result<()> {
    axum::serve(listener, router(accounts)).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn login(
    State(accounts): State<Accounts>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<SessionBody>, StubError> {
    let Json(payload) = payload.map_err(|e| StubError::Rejected(e.status(), e.body_text()))?;

    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(StubError::MissingCredentials);
    }

    let account = accounts
        .iter()
        .find(|a| a.credentials == payload)
        .ok_or(StubError::WrongCredentials)?;

    info!("Login for {} accepted.", payload.username);
    Ok(Json(account.session()))
}

#[derive(Debug)]
pub enum StubError {
    WrongCredentials,
    MissingCredentials,
    Rejected(StatusCode, String),
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            StubError::WrongCredentials => (StatusCode::OK, "invalid credentials".to_string()),
            StubError::MissingCredentials => (StatusCode::OK, "missing credentials".to_string()),
            StubError::Rejected(status, reason) => (status, reason),
        };
        warn!("Login rejected: {}", error);
        (status, Json(ErrorBody { error })).into_response()
    }
}
