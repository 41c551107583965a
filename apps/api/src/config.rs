use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub aws_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Local DynamoDB endpoint for development; unset in production.
    pub dynamo_endpoint: Option<String>,
    pub guides_table: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub mail_from: String,
    pub port: u16,
    pub rust_log: String,
    /// Per-stage timeout budgets (seconds). A stage that exceeds its budget
    /// fails that stage only; the pipeline carries on degraded.
    pub generate_timeout_secs: u64,
    pub render_timeout_secs: u64,
    pub deliver_timeout_secs: u64,
    pub persist_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            aws_region: require_env("AWS_REGION")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            dynamo_endpoint: std::env::var("DYNAMO_ENDPOINT").ok(),
            guides_table: env_or("GUIDES_TABLE", "Guides"),
            smtp_host: require_env("SMTP_HOST")?,
            smtp_port: env_parse("SMTP_PORT", 587)?,
            smtp_username: require_env("SMTP_USERNAME")?,
            smtp_password: require_env("SMTP_PASSWORD")?,
            mail_from: require_env("MAIL_FROM")?,
            port: env_parse("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            generate_timeout_secs: env_parse("GENERATE_TIMEOUT_SECS", 60)?,
            render_timeout_secs: env_parse("RENDER_TIMEOUT_SECS", 10)?,
            deliver_timeout_secs: env_parse("DELIVER_TIMEOUT_SECS", 15)?,
            persist_timeout_secs: env_parse("PERSIST_TIMEOUT_SECS", 10)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("'{key}' must be a valid number")),
        Err(_) => Ok(default),
    }
}
