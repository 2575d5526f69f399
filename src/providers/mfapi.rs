use crate::core::price::{FundQuote, PriceProvider};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Public mutual fund NAV feed (mfapi.in).
pub struct MfapiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl MfapiProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fundfold/0.1")
            .build()?;
        Ok(MfapiProvider {
            base_url: base_url.to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MfapiResponse {
    meta: MfapiMeta,
    #[serde(default)]
    data: Vec<MfapiNavPoint>,
}

#[derive(Debug, Deserialize)]
struct MfapiMeta {
    scheme_name: String,
}

// The feed serves nav as a decimal string.
#[derive(Debug, Deserialize)]
struct MfapiNavPoint {
    nav: String,
}

#[async_trait]
impl PriceProvider for MfapiProvider {
    async fn fetch_nav(&self, scheme_code: &str) -> Result<FundQuote> {
        let url = format!("{}/mf/{}", self.base_url, scheme_code);
        debug!("Requesting NAV data from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("NAV request failed for scheme: {scheme_code}"))?;

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for scheme: {scheme_code}"))?;

        let parsed: MfapiResponse = serde_json::from_str(&response_text).with_context(|| {
            format!(
                "Failed to parse NAV response for scheme: {scheme_code}. Response: '{response_text}'",
            )
        })?;

        // Most recent price point comes first in the feed.
        let latest = parsed
            .data
            .first()
            .ok_or_else(|| anyhow!("No price points for scheme: {}", scheme_code))?;
        let nav: f64 = latest
            .nav
            .parse()
            .with_context(|| format!("Invalid nav '{}' for scheme: {scheme_code}", latest.nav))?;

        debug!(
            "Successfully fetched NAV for scheme {}: {}",
            scheme_code, nav
        );

        Ok(FundQuote {
            nav,
            scheme_name: parsed.meta.scheme_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mfapi_mock_server(
        scheme_code: &str,
        mock_response: &str,
        status_code: u16,
    ) -> MockServer {
        let mock_server = MockServer::start().await;
        let expected_path = format!("/mf/{scheme_code}");

        Mock::given(method("GET"))
            .and(path(&expected_path))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    const SCHEME: &str = "120503";

    #[tokio::test]
    async fn test_successful_nav_fetch() {
        let mock_response = r#"{
            "meta": { "scheme_name": "Axis Bluechip Fund - Direct Growth" },
            "data": [
                { "date": "05-08-2026", "nav": "118.27400" },
                { "date": "04-08-2026", "nav": "117.90100" }
            ]
        }"#;
        let mock_server = create_mfapi_mock_server(SCHEME, mock_response, 200).await;

        let provider = MfapiProvider::new(&mock_server.uri()).unwrap();
        let quote = provider.fetch_nav(SCHEME).await.unwrap();

        assert_eq!(quote.nav, 118.274);
        assert_eq!(quote.scheme_name, "Axis Bluechip Fund - Direct Growth");
    }

    #[tokio::test]
    async fn test_empty_data_is_error() {
        let mock_response = r#"{ "meta": { "scheme_name": "My Fund" }, "data": [] }"#;
        let mock_server = create_mfapi_mock_server(SCHEME, mock_response, 200).await;

        let provider = MfapiProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_nav(SCHEME).await;

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            format!("No price points for scheme: {SCHEME}")
        );
    }

    #[tokio::test]
    async fn test_malformed_response_is_error() {
        let mock_response = r#"{ "not_meta": true }"#;
        let mock_server = create_mfapi_mock_server(SCHEME, mock_response, 200).await;

        let provider = MfapiProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_nav(SCHEME).await;

        assert!(result.is_err());
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("Failed to parse NAV response"));
        assert!(error_msg.contains(SCHEME));
    }

    #[tokio::test]
    async fn test_server_error_body_is_parse_error() {
        let mock_server = create_mfapi_mock_server(SCHEME, "Server Error", 500).await;

        let provider = MfapiProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_nav(SCHEME).await;

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse NAV response")
        );
    }

    #[tokio::test]
    async fn test_unparsable_nav_is_error() {
        let mock_response =
            r#"{ "meta": { "scheme_name": "My Fund" }, "data": [ { "nav": "N.A." } ] }"#;
        let mock_server = create_mfapi_mock_server(SCHEME, mock_response, 200).await;

        let provider = MfapiProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_nav(SCHEME).await;

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid nav 'N.A.'")
        );
    }
}
