use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    Recipe, RecipeDetail, RecipeId, Recommendation, RegistrationProfile, Tags, WeatherSnapshot,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_pref: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_goals: Option<String>,
}

impl RegisterRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        profile: RegistrationProfile,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            age: profile.age,
            gender: profile.gender,
            dietary_pref: profile.dietary_pref,
            allergies: profile.allergies,
            health_goals: profile.health_goals,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationQuery {
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub recipe_id: RecipeId,
    pub rating: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl From<WeatherPayload> for WeatherSnapshot {
    fn from(value: WeatherPayload) -> Self {
        Self {
            location: value.location,
            condition: value.condition,
            temp: value.temp,
            icon: value.icon.filter(|icon| !icon.is_empty()),
        }
    }
}

/// Either a list of tags or a single string. Anything else is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsPayload {
    List(Vec<Value>),
    Text(String),
    Other(Value),
}

impl From<TagsPayload> for Tags {
    fn from(value: TagsPayload) -> Self {
        match value {
            TagsPayload::List(items) => Tags::List(items.into_iter().map(value_text).collect()),
            TagsPayload::Text(text) => Tags::Text(text),
            TagsPayload::Other(raw) => Tags::Text(value_text(raw)),
        }
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePayload {
    pub id: RecipeId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub prep_time_minutes: Option<f64>,
    #[serde(default, rename = "prepTimeMinutes")]
    pub prep_time_minutes_camel: Option<f64>,
    /// Legacy spelling still emitted by older service builds.
    #[serde(default)]
    pub prep_time: Option<f64>,
    #[serde(default)]
    pub tags: Option<TagsPayload>,
    #[serde(default, rename = "type")]
    pub category: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl From<RecipePayload> for Recipe {
    fn from(value: RecipePayload) -> Self {
        Self {
            id: value.id,
            title: value.title,
            prep_time_minutes: value
                .prep_time_minutes_camel
                .or(value.prep_time_minutes)
                .or(value.prep_time),
            tags: value.tags.map(Tags::from).unwrap_or_default(),
            category: value.category,
            score: value.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub weather: Option<WeatherPayload>,
    pub recommendations: Vec<RecipePayload>,
}

impl From<RecommendationResponse> for Recommendation {
    fn from(value: RecommendationResponse) -> Self {
        Self {
            weather: value.weather.map(WeatherSnapshot::from),
            recipes: value
                .recommendations
                .into_iter()
                .map(Recipe::from)
                .collect(),
        }
    }
}

/// Ingredients are stored either as a JSON list or a comma-separated string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientsPayload {
    List(Vec<String>),
    Text(String),
}

impl IngredientsPayload {
    fn into_list(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            Self::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub summary: RecipePayload,
    #[serde(default)]
    pub ingredients: Option<IngredientsPayload>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub nutrition: Option<Map<String, Value>>,
    #[serde(default)]
    pub servings: Option<u32>,
}

impl From<RecipeDetailResponse> for RecipeDetail {
    fn from(value: RecipeDetailResponse) -> Self {
        Self {
            recipe: Recipe::from(value.summary),
            ingredients: value
                .ingredients
                .map(IngredientsPayload::into_list)
                .unwrap_or_default(),
            instructions: value.instructions,
            nutrition: value.nutrition.unwrap_or_default(),
            servings: value.servings,
        }
    }
}
