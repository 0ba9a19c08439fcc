//! Two-state view selection driven only by the session token.

use shared::domain::{Credentials, Recipe, RecipeDetail, RecipeId, Recommendation};
use tracing::info;

use crate::{
    api::ApiClient,
    auth::{AuthController, LoginOutcome, RegisterOutcome},
    config::ClientSettings,
    error::ClientError,
    recommendations::RecommendationClient,
    session::{FileTokenStorage, SessionStore, TokenStorage},
};

pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Unauthenticated(AuthMode),
    Authenticated,
}

/// Owns the session and is the only place it is mutated from.
pub struct Router {
    session: SessionStore,
    auth: AuthController,
    recommendations: RecommendationClient,
    auth_mode: AuthMode,
}

impl Router {
    pub fn new(
        session: SessionStore,
        auth: AuthController,
        recommendations: RecommendationClient,
    ) -> Self {
        Self {
            session,
            auth,
            recommendations,
            auth_mode: AuthMode::default(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::with_storage(settings, FileTokenStorage::new(&settings.session_file))
    }

    pub fn with_storage(settings: &ClientSettings, storage: impl TokenStorage + 'static) -> Self {
        let api = ApiClient::new(&settings.server_url);
        Self::new(
            SessionStore::open(storage),
            AuthController::new(api.clone()),
            RecommendationClient::with_default_location(api, &settings.default_location),
        )
    }

    pub fn current_view(&self) -> View {
        if self.session.is_authenticated() {
            View::Authenticated
        } else {
            View::Unauthenticated(self.auth_mode)
        }
    }

    /// Every path other than the root redirects there; the view is then re-derived.
    pub fn navigate(&mut self, path: &str) -> View {
        if path != ROOT_PATH {
            info!(path, "redirecting unknown path to root");
        }
        self.current_view()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    pub fn set_auth_mode(&mut self, mode: AuthMode) {
        self.auth_mode = mode;
    }

    pub fn recommendation(&self) -> &Recommendation {
        self.recommendations.current()
    }

    pub fn recipes(&self) -> &[Recipe] {
        self.recommendations.recipes()
    }

    /// A successful registration switches the form to login mode but does not sign in.
    pub async fn register(
        &mut self,
        credentials: &Credentials,
    ) -> Result<RegisterOutcome, ClientError> {
        let outcome = self.auth.register(credentials).await?;
        self.auth_mode = AuthMode::Login;
        Ok(outcome)
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<LoginOutcome, ClientError> {
        let outcome = self.auth.login(credentials, &mut self.session).await?;
        info!(view = ?self.current_view(), "session established");
        Ok(outcome)
    }

    /// Drops the token and whatever the dashboard was showing.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.recommendations.reset();
        self.auth_mode = AuthMode::Login;
        self.session.clear()
    }

    pub async fn get_recommendations(
        &mut self,
        location_input: &str,
    ) -> Result<&Recommendation, ClientError> {
        let token = self.session.get().ok_or(ClientError::NotAuthenticated)?;
        self.recommendations
            .get_recommendations(token, location_input)
            .await
    }

    pub async fn recipe_detail(&self, id: &RecipeId) -> Result<RecipeDetail, ClientError> {
        self.recommendations.recipe_detail(id).await
    }

    pub async fn submit_feedback(
        &self,
        recipe_id: RecipeId,
        rating: i64,
        comment: Option<String>,
    ) -> Result<String, ClientError> {
        let token = self.session.get().ok_or(ClientError::NotAuthenticated)?;
        self.recommendations
            .submit_feedback(token, recipe_id, rating, comment)
            .await
    }
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
