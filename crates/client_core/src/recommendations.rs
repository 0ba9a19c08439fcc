use shared::{
    domain::{
        AccessToken, Location, Recipe, RecipeDetail, RecipeId, Recommendation, WeatherSnapshot,
        DEFAULT_LOCATION,
    },
    protocol::FeedbackRequest,
};
use tracing::{info, warn};

use crate::{api::ApiClient, error::ClientError};

pub const RECOMMENDATIONS_FAILED: &str = "Error fetching recommendations";
pub const RECIPE_FAILED: &str = "Error fetching recipe";
pub const FEEDBACK_FAILED: &str = "Error sending feedback";
const FEEDBACK_SENT: &str = "Thanks for feedback";

/// Authorized lookups plus the last successful weather/recipe pair.
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    api: ApiClient,
    default_location: String,
    current: Recommendation,
}

impl RecommendationClient {
    pub fn new(api: ApiClient) -> Self {
        Self::with_default_location(api, DEFAULT_LOCATION)
    }

    pub fn with_default_location(api: ApiClient, default_location: impl Into<String>) -> Self {
        Self {
            api,
            default_location: default_location.into(),
            current: Recommendation::default(),
        }
    }

    pub fn current(&self) -> &Recommendation {
        &self.current
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.current.weather.as_ref()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.current.recipes
    }

    /// Forgets the displayed result, e.g. when the dashboard is left on logout.
    pub fn reset(&mut self) {
        self.current = Recommendation::default();
    }

    /// Replaces weather and recipes together on success; on any error both stay as they were.
    pub async fn get_recommendations(
        &mut self,
        token: &AccessToken,
        location_input: &str,
    ) -> Result<&Recommendation, ClientError> {
        let location = Location::resolve_with_default(location_input, &self.default_location);
        let res = self
            .api
            .recommend(token, &location)
            .await
            .inspect_err(|err| {
                warn!(location = location.as_str(), error = %err, "recommendation lookup failed");
            })?;

        self.current = Recommendation::from(res);
        info!(
            location = location.as_str(),
            recipes = self.current.recipes.len(),
            has_weather = self.current.weather.is_some(),
            "recommendations updated"
        );
        Ok(&self.current)
    }

    pub async fn recipe_detail(&self, id: &RecipeId) -> Result<RecipeDetail, ClientError> {
        let res = self.api.recipe(id).await.inspect_err(|err| {
            warn!(recipe_id = %id, error = %err, "recipe lookup failed");
        })?;
        Ok(RecipeDetail::from(res))
    }

    /// Returns the service's acknowledgement text.
    pub async fn submit_feedback(
        &self,
        token: &AccessToken,
        recipe_id: RecipeId,
        rating: i64,
        comment: Option<String>,
    ) -> Result<String, ClientError> {
        let body = FeedbackRequest {
            recipe_id,
            rating,
            comment: comment.filter(|comment| !comment.is_empty()),
        };
        let res = self.api.feedback(token, &body).await.inspect_err(|err| {
            warn!(recipe_id = %body.recipe_id, error = %err, "feedback rejected");
        })?;
        info!(recipe_id = %body.recipe_id, rating, "feedback sent");
        Ok(res.message().unwrap_or(FEEDBACK_SENT).to_string())
    }
}

#[cfg(test)]
#[path = "tests/recommendations_tests.rs"]
mod tests;
