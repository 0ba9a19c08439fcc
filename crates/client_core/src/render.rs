//! Display strings for the normalized model. Pure functions; no I/O.

use shared::domain::{Recipe, RecipeDetail, Recommendation, Tags, WeatherSnapshot};

pub const DEFAULT_ICON_CODE: &str = "01d";
pub const NO_RECOMMENDATIONS: &str = "No recommendations yet.";
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Integral values print without a fractional part (`30`, not `30.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub fn temperature_text(temp: Option<f64>) -> String {
    temp.map(format_number).unwrap_or_else(|| "N/A".to_string())
}

pub fn weather_icon_url(icon: Option<&str>) -> String {
    let code = icon.filter(|code| !code.is_empty()).unwrap_or(DEFAULT_ICON_CODE);
    format!("{ICON_BASE_URL}/{code}@2x.png")
}

/// Empty when neither the current nor the legacy prep-time field was sent.
pub fn prep_time_text(recipe: &Recipe) -> String {
    recipe
        .prep_time_minutes
        .map(format_number)
        .unwrap_or_default()
}

pub fn tags_text(tags: &Tags) -> String {
    match tags {
        Tags::List(items) => items.join(", "),
        Tags::Text(text) => text.clone(),
    }
}

pub fn weather_lines(weather: &WeatherSnapshot) -> Vec<String> {
    vec![
        format!("Weather ({})", weather.location),
        format!("Icon: {}", weather_icon_url(weather.icon.as_deref())),
        format!("Condition: {}", weather.condition),
        format!("Temp: {} °C", temperature_text(weather.temp)),
    ]
}

pub fn recipe_card(recipe: &Recipe) -> String {
    let mut card = format!(
        "{} — Prep: {} min — Tags: {}",
        recipe.title,
        prep_time_text(recipe),
        tags_text(&recipe.tags)
    );
    if let Some(category) = &recipe.category {
        card.push_str(&format!(" [{category}]"));
    }
    card
}

pub fn recommendation_lines(recommendation: &Recommendation) -> Vec<String> {
    let mut lines = recommendation
        .weather
        .as_ref()
        .map(weather_lines)
        .unwrap_or_default();
    if recommendation.recipes.is_empty() {
        lines.push(NO_RECOMMENDATIONS.to_string());
    } else {
        lines.extend(
            recommendation
                .recipes
                .iter()
                .map(|recipe| format!("{}   (id {})", recipe_card(recipe), recipe.id)),
        );
    }
    lines
}

pub fn recipe_detail_lines(detail: &RecipeDetail) -> Vec<String> {
    let mut lines = vec![recipe_card(&detail.recipe)];
    if let Some(servings) = detail.servings {
        lines.push(format!("Servings: {servings}"));
    }
    if !detail.ingredients.is_empty() {
        lines.push(format!("Ingredients: {}", detail.ingredients.join(", ")));
    }
    if let Some(instructions) = &detail.instructions {
        lines.push(format!("Instructions: {instructions}"));
    }
    for (key, value) in &detail.nutrition {
        let value = match value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        lines.push(format!("{key}: {value}"));
    }
    lines
}
