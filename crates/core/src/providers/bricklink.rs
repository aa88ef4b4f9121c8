use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::credentials::Credentials;
use crate::models::item::{Condition, GuideType, ItemIdentifier};
use crate::models::price::PriceGuideData;
use crate::signing::RequestSigner;

use super::traits::PriceGuide;

pub const API_BASE_URL: &str = "https://api.bricklink.com/api/store/v1";

/// BrickLink store API provider.
///
/// - **Auth**: every request carries a one-time OAuth 1.0a header built by
///   [`RequestSigner`]; missing credentials fail at construction time.
/// - **Timeout**: 30 seconds per round trip, no retries — a timeout or
///   transport error surfaces immediately as `CoreError::Network`.
/// - **Endpoint**: `GET {base}/items/{type}/{no}/price`.
pub struct BricklinkProvider {
    client: Client,
    signer: RequestSigner,
    base_url: String,
}

impl BricklinkProvider {
    /// Provider against the live BrickLink API.
    pub fn new(credentials: Credentials) -> Result<Self, CoreError> {
        Self::with_base_url(credentials, API_BASE_URL)
    }

    /// Provider against a custom endpoint (local test servers, sandboxes).
    pub fn with_base_url(
        credentials: Credentials,
        base_url: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let signer = RequestSigner::new(credentials)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Ok(Self {
            client,
            signer,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

// ── BrickLink API response envelope ─────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    meta: Meta,
    #[serde(default)]
    data: Option<PriceGuideData>,
}

#[derive(Default, Deserialize)]
struct Meta {
    code: Option<i64>,
    message: Option<String>,
}

#[async_trait]
impl PriceGuide for BricklinkProvider {
    fn name(&self) -> &str {
        "BrickLink"
    }

    async fn price_guide(
        &self,
        item: &ItemIdentifier,
        guide_type: GuideType,
        condition: Condition,
        currency_code: Option<&str>,
    ) -> Result<PriceGuideData, CoreError> {
        let url = format!(
            "{}/items/{}/{}/price",
            self.base_url,
            item.item_type(),
            item.item_no()
        );

        let mut params: Vec<(String, String)> = vec![
            ("guide_type".into(), guide_type.as_str().into()),
            ("new_or_used".into(), condition.as_str().into()),
        ];
        if let Some(code) = currency_code {
            params.push(("currency_code".into(), code.to_string()));
        }

        let authorization = self.signer.authorization_header("GET", &url, &params)?;

        debug!(
            %url,
            guide_type = guide_type.as_str(),
            condition = condition.as_str(),
            "GET (signed)"
        );

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_price_response(status, &body)
    }
}

/// Decode one price-guide HTTP response.
///
/// Pure function of (status, body) so the whole failure matrix is testable
/// without a network:
/// - non-2xx → `Status` carrying the code and the best-effort message;
/// - 2xx non-JSON body → `MalformedResponse`;
/// - `meta.code != 200` → `Api` with the server message;
/// - missing `data` → `UnexpectedFormat`.
pub fn parse_price_response(status: u16, body: &str) -> Result<PriceGuideData, CoreError> {
    if !(200..300).contains(&status) {
        return Err(CoreError::Status {
            status,
            message: error_message(body),
        });
    }

    let payload: ApiResponse = serde_json::from_str(body)
        .map_err(|e| CoreError::MalformedResponse(format!("invalid JSON body: {e}")))?;

    if payload.meta.code != Some(200) {
        return Err(CoreError::Api(
            payload
                .meta
                .message
                .unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }

    payload
        .data
        .ok_or_else(|| CoreError::UnexpectedFormat("response has no data object".into()))
}

/// Best-effort error text: the JSON `message` / `meta.message` field when
/// the body parses, otherwise the raw body, truncated.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| {
                value
                    .get("meta")
                    .and_then(|meta| meta.get("message"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string);
        if let Some(message) = message {
            return message;
        }
    }
    truncated(body, 200)
}

fn truncated(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
