//! Terminal input parsed into one user action each.

use anyhow::{anyhow, bail, Result};
use client_core::AuthMode;
use shared::domain::{RecipeId, RegistrationProfile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mode(AuthMode),
    Register {
        email: String,
        password: String,
        name: String,
        profile: RegistrationProfile,
    },
    Login {
        email: String,
        password: String,
    },
    Recommend {
        location: String,
    },
    Recipe {
        id: RecipeId,
    },
    Feedback {
        recipe_id: RecipeId,
        rating: i64,
        comment: Option<String>,
    },
    Go {
        path: String,
    },
    Status,
    Logout,
    Help,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mode(_) => "mode",
            Self::Register { .. } => "register",
            Self::Login { .. } => "login",
            Self::Recommend { .. } => "recommend",
            Self::Recipe { .. } => "recipe",
            Self::Feedback { .. } => "feedback",
            Self::Go { .. } => "go",
            Self::Status => "status",
            Self::Logout => "logout",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

pub const HELP: &str = "\
commands:
  mode login|register                  switch the sign-in form
  register <email> <password> <name...> [age=N] [gender=G] [diet=D] [allergies=a,b] [goals=G]
                                       create an account
  login <email> <password>             sign in
  recommend [city...]                  weather + recipes (empty city means the default)
  recipe <id>                          show one recipe in full
  feedback <id> <rating> [comment...]  rate a recipe
  go <path>                            navigate (anything but / returns to /)
  status                               check the service is reachable
  logout | help | quit";

pub fn parse(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        bail!("empty command");
    };
    let rest: Vec<&str> = words.collect();

    let cmd = match verb {
        "mode" => match rest.as_slice() {
            ["login"] => Command::Mode(AuthMode::Login),
            ["register"] => Command::Mode(AuthMode::Register),
            _ => bail!("usage: mode login|register"),
        },
        "register" => match rest.as_slice() {
            [email, password, tail @ ..] => {
                let (name, profile) = registration_tail(tail)?;
                Command::Register {
                    email: email.to_string(),
                    password: password.to_string(),
                    name,
                    profile,
                }
            }
            _ => bail!("usage: register <email> <password> <name...> [key=value...]"),
        },
        "login" => match rest.as_slice() {
            [email, password] => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => bail!("usage: login <email> <password>"),
        },
        "recommend" => Command::Recommend {
            location: location_argument(line),
        },
        "recipe" => match rest.as_slice() {
            [id] => Command::Recipe {
                id: parse_recipe_id(id),
            },
            _ => bail!("usage: recipe <id>"),
        },
        "feedback" => match rest.as_slice() {
            [id, rating, comment @ ..] => Command::Feedback {
                recipe_id: parse_recipe_id(id),
                rating: rating
                    .parse()
                    .map_err(|_| anyhow!("rating must be a whole number, got '{rating}'"))?,
                comment: (!comment.is_empty()).then(|| comment.join(" ")),
            },
            _ => bail!("usage: feedback <id> <rating> [comment...]"),
        },
        "go" => match rest.as_slice() {
            [path] => Command::Go {
                path: path.to_string(),
            },
            _ => bail!("usage: go <path>"),
        },
        "status" => Command::Status,
        "logout" => Command::Logout,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(cmd)
}

/// Plain words form the name; `key=value` words fill the optional profile.
fn registration_tail(words: &[&str]) -> Result<(String, RegistrationProfile)> {
    let mut name = Vec::new();
    let mut profile = RegistrationProfile::default();
    for word in words {
        let Some((key, value)) = word.split_once('=') else {
            name.push(*word);
            continue;
        };
        match key {
            "age" => {
                profile.age = Some(
                    value
                        .parse()
                        .map_err(|_| anyhow!("age must be a whole number, got '{value}'"))?,
                )
            }
            "gender" => profile.gender = Some(value.to_string()),
            "diet" => profile.dietary_pref = Some(value.to_string()),
            "allergies" => {
                profile.allergies = value
                    .split(',')
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            "goals" => profile.health_goals = Some(value.to_string()),
            other => bail!("unknown profile field '{other}'"),
        }
    }
    Ok((name.join(" "), profile))
}

/// Everything after the verb, kept verbatim apart from one separating whitespace character.
fn location_argument(line: &str) -> String {
    let line = line.trim_start();
    let after_verb = &line["recommend".len()..];
    let mut chars = after_verb.chars();
    match chars.next() {
        Some(sep) if sep.is_whitespace() => chars.as_str().to_string(),
        _ => after_verb.to_string(),
    }
}

fn parse_recipe_id(raw: &str) -> RecipeId {
    raw.parse::<i64>()
        .map(RecipeId::Number)
        .unwrap_or_else(|_| RecipeId::Text(raw.to_string()))
}
