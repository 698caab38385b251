use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Debug, Display};

use crate::error::LoginError;

pub const USER_ID_FIELD: &str = "TobitUserID";
pub const PERSON_ID_FIELD: &str = "PersonID";
pub const ACCESS_TOKEN_FIELD: &str = "TobitAccessToken";

/// The body of a login request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn to_body(&self) -> Result<Vec<u8>, LoginError> {
        serde_json::to_vec(self).map_err(|e| LoginError::ClientInit(e.to_string()))
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session identifiers handed out by a successful login. Values are kept
/// exactly as the service sent them.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub tobit_user_id: Value,
    pub person_id: Value,
    pub access_token: Value,
}

impl Session {
    /// Classifies a parsed login response. A body carrying `error` is a
    /// rejected login even though the exchange itself succeeded.
    pub fn from_response(response: &Value) -> Result<Self, LoginError> {
        if let Some(error) = response.get("error") {
            let message = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(LoginError::ServerReported(message));
        }

        Ok(Self {
            tobit_user_id: field(response, USER_ID_FIELD)?,
            person_id: field(response, PERSON_ID_FIELD)?,
            access_token: field(response, ACCESS_TOKEN_FIELD)?,
        })
    }
}

fn field(response: &Value, name: &'static str) -> Result<Value, LoginError> {
    response
        .get(name)
        .cloned()
        .ok_or(LoginError::MissingField(name))
}

impl Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TobitUserID: {}\nPersonID: {}\nToken: {}",
            self.tobit_user_id, self.person_id, self.access_token
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Success payload as produced by the stub service.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionBody {
    #[serde(rename = "TobitUserID")]
    pub tobit_user_id: u64,
    #[serde(rename = "PersonID")]
    pub person_id: String,
    #[serde(rename = "TobitAccessToken")]
    pub tobit_access_token: String,
}
