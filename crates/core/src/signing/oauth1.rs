use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::errors::CoreError;
use crate::models::credentials::Credentials;

use super::percent::percent_encode;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Builds one-time `Authorization` header values for signed GET requests
/// (one-legged OAuth 1.0a with HMAC-SHA1, the BrickLink store API scheme).
///
/// The header proves possession of the consumer/token secrets without
/// transmitting them: the secrets only enter the HMAC signing key. Clock
/// skew and nonce reuse are the server's concern and are not checked here.
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Fails with the exact missing credential names before any request
    /// could be made.
    pub fn new(credentials: Credentials) -> Result<Self, CoreError> {
        credentials.validate()?;
        Ok(Self { credentials })
    }

    /// Authorization header for a single request. A fresh nonce and the
    /// current UNIX timestamp are generated per call, so every header is
    /// single-use.
    ///
    /// `url` is the target without query string; `params` are the query
    /// parameters that will be sent with the request.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
    ) -> Result<String, CoreError> {
        let nonce = generate_nonce()?;
        let timestamp = chrono::Utc::now().timestamp();
        Ok(self.authorization_header_at(method, url, params, &nonce, timestamp))
    }

    /// Deterministic variant: with nonce and timestamp supplied by the
    /// caller, the header is a pure function of its inputs.
    pub fn authorization_header_at(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let mut oauth_params: Vec<(String, String)> = vec![
            (
                "oauth_consumer_key".into(),
                self.credentials.consumer_key.clone(),
            ),
            ("oauth_nonce".into(), nonce.to_string()),
            ("oauth_signature_method".into(), SIGNATURE_METHOD.into()),
            ("oauth_timestamp".into(), timestamp.to_string()),
            ("oauth_token".into(), self.credentials.token_value.clone()),
            ("oauth_version".into(), OAUTH_VERSION.into()),
        ];

        let signature = self.sign(method, url, params, &oauth_params);
        oauth_params.push(("oauth_signature".into(), signature));
        oauth_params.sort();

        let header_params: Vec<String> = oauth_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
            .collect();
        format!("OAuth {}", header_params.join(", "))
    }

    /// Signature base string + signing key → base64(HMAC-SHA1).
    fn sign(
        &self,
        method: &str,
        url: &str,
        query: &[(String, String)],
        oauth_params: &[(String, String)],
    ) -> String {
        // Normalize: encode every key and value first, then sort by the
        // ENCODED key (encoded value breaks ties). Sorting raw keys gives a
        // different order for keys containing reserved characters.
        let mut pairs: Vec<(String, String)> = query
            .iter()
            .chain(oauth_params.iter())
            .map(|(key, value)| (percent_encode(key), percent_encode(value)))
            .collect();
        pairs.sort();

        let param_string = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let base_string = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(normalize_url(url)),
            percent_encode(&param_string)
        );
        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.credentials.consumer_secret),
            percent_encode(&self.credentials.token_secret)
        );

        hmac_sha1_base64(signing_key.as_bytes(), base_string.as_bytes())
    }
}

/// The base string covers scheme+host+path only: anything from `?` or `#`
/// on is not part of the normalized URL.
fn normalize_url(url: &str) -> &str {
    match url.find(['?', '#']) {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Keyed 160-bit digest, base64-encoded — the OAuth 1.0a signature value.
pub fn hmac_sha1_base64(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Fresh nonce: 16 random bytes (128 bits of entropy), hex-encoded.
pub fn generate_nonce() -> Result<String, CoreError> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| CoreError::Signing(format!("Failed to generate nonce: {e}")))?;
    Ok(hex::encode(bytes))
}
