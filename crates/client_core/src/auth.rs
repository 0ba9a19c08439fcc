use shared::{
    domain::{AccessToken, Credentials},
    protocol::{LoginRequest, RegisterRequest},
};
use tracing::{info, warn};

use crate::{api::ApiClient, error::ClientError, session::SessionStore};

pub const REGISTER_FAILED: &str = "Register failed";
pub const LOGIN_FAILED: &str = "Login failed";
const REGISTERED: &str = "Registered";
const LOGGED_IN: &str = "Logged in!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub message: String,
    pub user_id: Option<i64>,
    /// False when the token is held in memory only because storage refused it.
    pub persisted: bool,
}

/// Registration and login exchanges. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct AuthController {
    api: ApiClient,
}

impl AuthController {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn register(
        &self,
        credentials: &Credentials,
    ) -> Result<RegisterOutcome, ClientError> {
        let name = require("name", credentials.name.as_deref().unwrap_or_default())?;
        let email = require("email", &credentials.email)?;
        let password = require("password", &credentials.password)?;

        let body = RegisterRequest::new(name, email, password, credentials.profile.clone());
        let res = self.api.register(&body).await.inspect_err(|err| {
            warn!(error = %err, "registration rejected");
        })?;

        info!("registration accepted");
        Ok(RegisterOutcome {
            message: res.message().unwrap_or(REGISTERED).to_string(),
        })
    }

    /// On success the token lands in `session` before this returns, even if
    /// it could not be written to storage.
    pub async fn login(
        &self,
        credentials: &Credentials,
        session: &mut SessionStore,
    ) -> Result<LoginOutcome, ClientError> {
        let body = LoginRequest {
            email: require("email", &credentials.email)?.to_string(),
            password: require("password", &credentials.password)?.to_string(),
        };
        let res = self.api.login(&body).await.inspect_err(|err| {
            warn!(error = %err, "login rejected");
        })?;

        let persisted = match session.set(AccessToken::new(res.access_token)) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "token kept in memory only");
                false
            }
        };
        info!(user_id = ?res.user_id, persisted, "logged in");
        Ok(LoginOutcome {
            message: LOGGED_IN.to_string(),
            user_id: res.user_id,
            persisted,
        })
    }
}

fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ClientError> {
    if value.is_empty() {
        return Err(ClientError::MissingField(field));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
