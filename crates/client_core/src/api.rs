//! Thin HTTP layer over the recommendation service endpoints.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{AccessToken, Location, RecipeId},
    error::ServiceMessage,
    protocol::{
        FeedbackRequest, LoginRequest, LoginResponse, RecipeDetailResponse, RecommendationQuery,
        RecommendationResponse, RegisterRequest,
    },
};
use tracing::{debug, warn};

use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    server_url: String,
}

impl ApiClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), server_url)
    }

    pub fn with_http_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub async fn probe(&self) -> Result<ServiceMessage, ClientError> {
        let req = self.http.get(format!("{}/", self.server_url));
        self.send_message("probe", req).await
    }

    pub async fn register(&self, body: &RegisterRequest) -> Result<ServiceMessage, ClientError> {
        let req = self
            .http
            .post(format!("{}/register", self.server_url))
            .json(body);
        self.send_message("register", req).await
    }

    pub async fn login(&self, body: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let req = self.http.post(format!("{}/login", self.server_url)).json(body);
        self.send("login", req).await
    }

    pub async fn recommend(
        &self,
        token: &AccessToken,
        location: &Location,
    ) -> Result<RecommendationResponse, ClientError> {
        let req = self
            .http
            .get(format!("{}/recipes/recommend", self.server_url))
            .bearer_auth(token.as_str())
            .query(&RecommendationQuery {
                location: location.as_str().to_string(),
            });
        self.send("recommend", req).await
    }

    pub async fn recipe(&self, id: &RecipeId) -> Result<RecipeDetailResponse, ClientError> {
        let req = self.http.get(format!("{}/recipes/{id}", self.server_url));
        self.send("recipe", req).await
    }

    pub async fn feedback(
        &self,
        token: &AccessToken,
        body: &FeedbackRequest,
    ) -> Result<ServiceMessage, ClientError> {
        let req = self
            .http
            .post(format!("{}/feedback", self.server_url))
            .bearer_auth(token.as_str())
            .json(body);
        self.send_message("feedback", req).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        req: RequestBuilder,
    ) -> Result<T, ClientError> {
        let body = self.exchange(endpoint, req).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Success bodies here are informational; an empty or shapeless one reads as no message.
    async fn send_message(
        &self,
        endpoint: &'static str,
        req: RequestBuilder,
    ) -> Result<ServiceMessage, ClientError> {
        let body = self.exchange(endpoint, req).await?;
        Ok(ServiceMessage::from_body(&String::from_utf8_lossy(&body)))
    }

    async fn exchange(
        &self,
        endpoint: &'static str,
        req: RequestBuilder,
    ) -> Result<Vec<u8>, ClientError> {
        let res = req.send().await.map_err(|err| {
            warn!(endpoint, error = %err, "request failed before a response arrived");
            ClientError::Transport(err)
        })?;
        let status = res.status();
        let body = res.bytes().await?;
        debug!(endpoint, status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            let message = ServiceMessage::from_body(&String::from_utf8_lossy(&body));
            warn!(endpoint, status = status.as_u16(), "service rejected request");
            return Err(ClientError::Service {
                status: status.as_u16(),
                message: message.message().map(str::to_string),
            });
        }

        Ok(body.to_vec())
    }
}
