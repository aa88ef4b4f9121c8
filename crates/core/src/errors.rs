use thiserror::Error;

/// Unified error type for the entire bricklink-price-core library.
/// Every public function returns `Result<T, CoreError>`.
///
/// Dirty feed data (a sale record with an unparseable date or price) is
/// NOT an error anywhere: aggregation skips such records and degrades
/// gracefully instead of failing the whole run.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ───────────────────────────────────────────────
    #[error("Missing BrickLink API credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("Signing error: {0}")]
    Signing(String),

    // ── Transport ───────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    // ── Upstream API ────────────────────────────────────────────────
    #[error("BrickLink API request failed with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("BrickLink API error: {0}")]
    Api(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("Unexpected API response format: {0}")]
    UnexpectedFormat(String),

    // ── Storage / File ──────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid export file {file}: {reason}")]
    InvalidExport { file: String, reason: String },
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so a
        // signed request URL never leaks oauth parameters into error text.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
