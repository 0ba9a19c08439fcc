use std::fmt;

use serde::{Deserialize, Serialize};

/// City used when the caller leaves the location empty.
pub const DEFAULT_LOCATION: &str = "Delhi";

/// Opaque bearer credential issued by the authentication service.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Optional profile fields accepted alongside a registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationProfile {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub dietary_pref: Option<String>,
    pub allergies: Vec<String>,
    pub health_goals: Option<String>,
}

/// Per-submission form values. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub profile: RegistrationProfile,
}

impl Credentials {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
            password: password.into(),
            profile: RegistrationProfile::default(),
        }
    }

    pub fn registration(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
            password: password.into(),
            profile: RegistrationProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: RegistrationProfile) -> Self {
        self.profile = profile;
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Free-text city name sent as the `location` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    /// Empty input falls back to [`DEFAULT_LOCATION`]; anything else is kept verbatim.
    pub fn resolve(input: &str) -> Self {
        Self::resolve_with_default(input, DEFAULT_LOCATION)
    }

    pub fn resolve_with_default(input: &str, default: &str) -> Self {
        if input.is_empty() {
            Self(default.to_string())
        } else {
            Self(input.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub location: String,
    pub condition: String,
    pub temp: Option<f64>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Tags arrive either as a list or as a single preformatted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tags {
    List(Vec<String>),
    Text(String),
}

impl Default for Tags {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub prep_time_minutes: Option<f64>,
    pub tags: Tags,
    pub category: Option<String>,
    pub score: Option<f64>,
}

pub type RecipeList = Vec<Recipe>;

/// Weather and recipes from one successful lookup, always replaced together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recommendation {
    pub weather: Option<WeatherSnapshot>,
    pub recipes: RecipeList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub nutrition: serde_json::Map<String, serde_json::Value>,
    pub servings: Option<u32>,
}
