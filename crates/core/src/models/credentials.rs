use crate::errors::CoreError;

/// Environment variables holding the four BrickLink API secrets.
pub const ENV_CONSUMER_KEY: &str = "BRICKLINK_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "BRICKLINK_CONSUMER_SECRET";
pub const ENV_TOKEN_VALUE: &str = "BRICKLINK_TOKEN_VALUE";
pub const ENV_TOKEN_SECRET: &str = "BRICKLINK_TOKEN_SECRET";

/// The four BrickLink API secrets: consumer key/secret and token
/// value/secret.
///
/// Loaded once per process and shared read-only from then on. Deliberately
/// implements neither `Debug` nor `Display` — secret material stays out of
/// logs and error messages.
#[derive(Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token_value: String,
    pub token_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token_value: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token_value: token_value.into(),
            token_secret: token_secret.into(),
        }
    }

    /// Load credentials from the `BRICKLINK_*` environment variables.
    ///
    /// Unset or empty variables fail with the exact missing names —
    /// before any network I/O is attempted.
    pub fn from_env() -> Result<Self, CoreError> {
        let credentials = Self::new(
            std::env::var(ENV_CONSUMER_KEY).unwrap_or_default(),
            std::env::var(ENV_CONSUMER_SECRET).unwrap_or_default(),
            std::env::var(ENV_TOKEN_VALUE).unwrap_or_default(),
            std::env::var(ENV_TOKEN_SECRET).unwrap_or_default(),
        );
        credentials.validate()?;
        Ok(credentials)
    }

    /// Every secret must be present and non-empty or every signed call
    /// fails. The error names exactly the missing ones.
    pub fn validate(&self) -> Result<(), CoreError> {
        let missing: Vec<String> = [
            (ENV_CONSUMER_KEY, &self.consumer_key),
            (ENV_CONSUMER_SECRET, &self.consumer_secret),
            (ENV_TOKEN_VALUE, &self.token_value),
            (ENV_TOKEN_SECRET, &self.token_secret),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| (*name).to_string())
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::MissingCredentials(missing))
        }
    }
}
