pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod recommendations;
pub mod render;
pub mod router;
pub mod session;

pub use api::ApiClient;
pub use auth::{AuthController, LoginOutcome, RegisterOutcome};
pub use config::{load_settings, ClientSettings};
pub use error::ClientError;
pub use recommendations::RecommendationClient;
pub use router::{AuthMode, Router, View};
pub use session::{FileTokenStorage, MemoryTokenStorage, SessionStore, TokenStorage};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
