// Opportunistic country detection via IP geolocation
//
// Best effort only: any failure (offline, timeout, rate limit, unknown
// country) falls back to the configured default dial code.

use std::time::Duration;

use serde::Deserialize;

use crate::countries;

const GEO_ENDPOINT: &str = "https://ipapi.co/json/";

#[derive(Debug, Deserialize)]
struct GeoResponse {
    country_code: Option<String>,
}

/// Guess the caller's dial code from their public IP. Returns `None` on any
/// failure; never an error.
pub fn detect_dial_code() -> Option<String> {
    let mut response = ureq::get(GEO_ENDPOINT)
        .config()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(10)))
        .build()
        .call()
        .map_err(|e| tracing::debug!("country lookup request failed: {e}"))
        .ok()?;

    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        tracing::debug!("country lookup failed with HTTP {status}");
        return None;
    }

    let body: GeoResponse = response
        .body_mut()
        .read_json()
        .map_err(|e| tracing::debug!("invalid country lookup response: {e}"))
        .ok()?;

    dial_for_iso(body.country_code.as_deref()?)
}

fn dial_for_iso(iso: &str) -> Option<String> {
    let dial = countries::by_iso(iso).map(|c| c.dial.to_string());
    if dial.is_none() {
        tracing::debug!("country lookup returned unknown code: {iso}");
    }
    dial
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dial_for_iso() {
        assert_eq!(dial_for_iso("ES"), Some("+34".to_string()));
        assert_eq!(dial_for_iso("us"), Some("+1".to_string()));
        assert_eq!(dial_for_iso("XX"), None);
    }

    #[test]
    fn test_response_shape() {
        let body: GeoResponse = serde_json::from_str(r#"{"ip":"1.2.3.4","country_code":"MX"}"#).unwrap();
        assert_eq!(body.country_code.as_deref(), Some("MX"));

        let empty: GeoResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.country_code.is_none());
    }
}
