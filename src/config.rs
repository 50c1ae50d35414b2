// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Runtime configuration, collected once from the environment at startup.
///
/// The provider base URLs default to the real endpoints and exist mainly
/// so integration tests can point the generation chain at stub servers.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub port: u16,
    pub rust_log: String,

    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,

    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        // 7 days, matching the token lifetime the clients were built around
        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(604_800);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let openai_api_key = env::var("OPENAI_API_KEY").ok();
        let openai_model =
            env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let gemini_api_key = env::var("GEMINI_API_KEY").ok();
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());
        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            port,
            rust_log,
            openai_api_key,
            openai_model,
            openai_base_url,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
        }
    }
}
