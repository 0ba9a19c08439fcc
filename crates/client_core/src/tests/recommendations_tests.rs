use super::*;
use axum::http::StatusCode;
use serde_json::{json, Value};
use shared::domain::Tags;

use crate::test_support::{spawn_service, unreachable_url};

fn delhi_body() -> Value {
    json!({
        "weather": { "location": "Delhi", "condition": "Clear", "temp": 30 },
        "recommendations": [
            { "id": 1, "title": "Dal", "prep_time_minutes": 15, "tags": ["veg"] }
        ]
    })
}

fn token() -> AccessToken {
    AccessToken::new("T1")
}

#[tokio::test]
async fn empty_location_falls_back_to_delhi_with_bearer_token() {
    let service = spawn_service(vec![(
        "GET /recipes/recommend",
        StatusCode::OK,
        delhi_body(),
    )])
    .await;
    let mut client = RecommendationClient::new(ApiClient::new(&service.url));

    let recommendation = client
        .get_recommendations(&token(), "")
        .await
        .expect("recommend")
        .clone();

    let calls = service.requests_to("/recipes/recommend").await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query.get("location").map(String::as_str), Some("Delhi"));
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer T1"));

    let weather = recommendation.weather.expect("weather");
    assert_eq!(weather.condition, "Clear");
    assert_eq!(weather.temp, Some(30.0));
    assert_eq!(recommendation.recipes.len(), 1);
    assert_eq!(recommendation.recipes[0].title, "Dal");
    assert_eq!(recommendation.recipes[0].prep_time_minutes, Some(15.0));
    assert_eq!(
        recommendation.recipes[0].tags,
        Tags::List(vec!["veg".to_string()])
    );
}

#[tokio::test]
async fn non_empty_location_is_sent_verbatim() {
    let service = spawn_service(vec![(
        "GET /recipes/recommend",
        StatusCode::OK,
        delhi_body(),
    )])
    .await;
    let mut client = RecommendationClient::new(ApiClient::new(&service.url));

    client
        .get_recommendations(&token(), "  London  ")
        .await
        .expect("recommend");

    let calls = service.requests_to("/recipes/recommend").await;
    assert_eq!(
        calls[0].query.get("location").map(String::as_str),
        Some("  London  ")
    );
}

#[tokio::test]
async fn configured_default_location_replaces_delhi() {
    let service = spawn_service(vec![(
        "GET /recipes/recommend",
        StatusCode::OK,
        delhi_body(),
    )])
    .await;
    let mut client =
        RecommendationClient::with_default_location(ApiClient::new(&service.url), "Kochi");

    client.get_recommendations(&token(), "").await.expect("recommend");

    let calls = service.requests_to("/recipes/recommend").await;
    assert_eq!(calls[0].query.get("location").map(String::as_str), Some("Kochi"));
}

async fn client_with_prior_result() -> (RecommendationClient, Recommendation) {
    let service = spawn_service(vec![(
        "GET /recipes/recommend",
        StatusCode::OK,
        delhi_body(),
    )])
    .await;
    let mut client = RecommendationClient::new(ApiClient::new(&service.url));
    let prior = client
        .get_recommendations(&token(), "")
        .await
        .expect("seed")
        .clone();
    (client, prior)
}

#[tokio::test]
async fn rejected_lookup_leaves_prior_result_untouched() {
    let (client, prior) = client_with_prior_result().await;
    let failing = spawn_service(vec![(
        "GET /recipes/recommend",
        StatusCode::UNAUTHORIZED,
        json!({ "msg": "Invalid token" }),
    )])
    .await;
    let mut client = RecommendationClient {
        api: ApiClient::new(&failing.url),
        ..client
    };

    let err = client
        .get_recommendations(&token(), "Paris")
        .await
        .expect_err("must fail");

    assert_eq!(err.user_message(RECOMMENDATIONS_FAILED), "Invalid token");
    assert!(err.requires_reauth());
    assert_eq!(client.current(), &prior);
}

#[tokio::test]
async fn malformed_body_leaves_prior_result_untouched() {
    let (client, prior) = client_with_prior_result().await;
    let failing = spawn_service(vec![(
        "GET /recipes/recommend",
        StatusCode::OK,
        json!({ "weather": { "location": "Paris" } }),
    )])
    .await;
    let mut client = RecommendationClient {
        api: ApiClient::new(&failing.url),
        ..client
    };

    let err = client
        .get_recommendations(&token(), "Paris")
        .await
        .expect_err("must fail");

    assert!(matches!(err, ClientError::Decode(_)));
    assert_eq!(
        err.user_message(RECOMMENDATIONS_FAILED),
        RECOMMENDATIONS_FAILED
    );
    assert_eq!(client.current(), &prior);
}

#[tokio::test]
async fn transport_failure_leaves_prior_result_untouched() {
    let (client, prior) = client_with_prior_result().await;
    let mut client = RecommendationClient {
        api: ApiClient::new(unreachable_url().await),
        ..client
    };

    let err = client
        .get_recommendations(&token(), "")
        .await
        .expect_err("must fail");

    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(client.weather(), prior.weather.as_ref());
    assert_eq!(client.recipes(), prior.recipes.as_slice());
}

#[tokio::test]
async fn unknown_city_replaces_weather_with_absent() {
    let (client, _prior) = client_with_prior_result().await;
    let service = spawn_service(vec![(
        "GET /recipes/recommend",
        StatusCode::OK,
        json!({
            "weather": null,
            "recommendations": [{ "id": 2, "title": "Lassi", "tags": "drinks" }]
        }),
    )])
    .await;
    let mut client = RecommendationClient {
        api: ApiClient::new(&service.url),
        ..client
    };

    client
        .get_recommendations(&token(), "Atlantis")
        .await
        .expect("recommend");

    assert!(client.weather().is_none());
    assert_eq!(client.recipes().len(), 1);
    assert_eq!(client.recipes()[0].tags, Tags::Text("drinks".to_string()));
}

#[tokio::test]
async fn reset_clears_displayed_result() {
    let (mut client, _prior) = client_with_prior_result().await;
    client.reset();
    assert!(client.weather().is_none());
    assert!(client.recipes().is_empty());
}

#[tokio::test]
async fn recipe_detail_is_fetched_without_auth() {
    let service = spawn_service(vec![(
        "GET /recipes/3",
        StatusCode::OK,
        json!({
            "id": 3, "title": "Poha", "ingredients": ["poha", "onion"],
            "instructions": "Rinse and temper.", "prep_time_minutes": 20,
            "tags": ["breakfast"], "nutrition": { "kcal": 250 }, "servings": 2
        }),
    )])
    .await;
    let client = RecommendationClient::new(ApiClient::new(&service.url));

    let detail = client
        .recipe_detail(&RecipeId::Number(3))
        .await
        .expect("detail");

    assert_eq!(detail.recipe.title, "Poha");
    assert_eq!(detail.ingredients, vec!["poha", "onion"]);
    assert_eq!(detail.nutrition.get("kcal"), Some(&json!(250)));
    let calls = service.requests_to("/recipes/3").await;
    assert!(calls[0].authorization.is_none());
}

#[tokio::test]
async fn missing_recipe_surfaces_service_message() {
    let service = spawn_service(Vec::new()).await;
    let client = RecommendationClient::new(ApiClient::new(&service.url));

    let err = client
        .recipe_detail(&RecipeId::Number(99))
        .await
        .expect_err("must fail");

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(RECIPE_FAILED), "no such route");
}

#[tokio::test]
async fn feedback_posts_rating_with_bearer_token() {
    let service = spawn_service(vec![(
        "POST /feedback",
        StatusCode::OK,
        json!({ "msg": "thanks for feedback" }),
    )])
    .await;
    let client = RecommendationClient::new(ApiClient::new(&service.url));

    let message = client
        .submit_feedback(&token(), RecipeId::Number(1), 5, Some("lovely".to_string()))
        .await
        .expect("feedback");

    assert_eq!(message, "thanks for feedback");
    let calls = service.requests_to("/feedback").await;
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer T1"));
    assert_eq!(
        calls[0].body,
        Some(json!({ "recipe_id": 1, "rating": 5, "comment": "lovely" }))
    );
}

#[tokio::test]
async fn feedback_omits_empty_comment() {
    let service = spawn_service(vec![("POST /feedback", StatusCode::OK, json!({}))]).await;
    let client = RecommendationClient::new(ApiClient::new(&service.url));

    let message = client
        .submit_feedback(&token(), RecipeId::Number(1), 3, Some(String::new()))
        .await
        .expect("feedback");

    assert_eq!(message, "Thanks for feedback");
    let calls = service.requests_to("/feedback").await;
    assert_eq!(calls[0].body, Some(json!({ "recipe_id": 1, "rating": 3 })));
}

#[tokio::test]
async fn recipe_carrying_both_prep_time_spellings_still_loads() {
    let service = spawn_service(vec![(
        "GET /recipes/recommend",
        StatusCode::OK,
        json!({
            "weather": null,
            "recommendations": [
                { "id": 1, "title": "Dal", "prep_time_minutes": 15, "prepTimeMinutes": 20 }
            ]
        }),
    )])
    .await;
    let mut client = RecommendationClient::new(ApiClient::new(&service.url));

    let recommendation = client
        .get_recommendations(&token(), "")
        .await
        .expect("recommend");

    assert_eq!(recommendation.recipes.len(), 1);
    assert_eq!(recommendation.recipes[0].prep_time_minutes, Some(20.0));
}

#[tokio::test]
async fn feedback_accepts_a_bare_success_status() {
    let service = spawn_service(vec![("POST /feedback", StatusCode::NO_CONTENT, Value::Null)]).await;
    let client = RecommendationClient::new(ApiClient::new(&service.url));

    let message = client
        .submit_feedback(&token(), RecipeId::Number(1), 4, None)
        .await
        .expect("feedback");

    assert_eq!(message, "Thanks for feedback");
}
