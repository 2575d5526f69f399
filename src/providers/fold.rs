//! Client for the Fold identity service (OTP login)

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Numbers without an explicit country code are assumed domestic.
const DEFAULT_COUNTRY_CODE: &str = "+91";

pub struct FoldClient {
    base_url: String,
    client: reqwest::Client,
}

/// Token set returned by a successful OTP verification.
#[derive(Debug, Clone)]
pub struct VerifiedSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user_uuid: String,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    data: VerifyData,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    access_token: String,
    refresh_token: String,
    user_meta: UserMeta,
}

#[derive(Debug, Deserialize)]
struct UserMeta {
    uuid: String,
}

pub fn normalize_phone(phone: &str) -> String {
    if phone.starts_with('+') {
        phone.to_string()
    } else {
        format!("{DEFAULT_COUNTRY_CODE}{phone}")
    }
}

impl FoldClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fundfold/0.1")
            .build()?;
        Ok(FoldClient {
            base_url: base_url.to_string(),
            client,
        })
    }

    /// Asks Fold to send an OTP over SMS.
    pub async fn request_otp(&self, phone: &str) -> Result<()> {
        let url = format!("{}/auth/otp", self.base_url);
        let payload = json!({ "phone": normalize_phone(phone), "channel": "sms" });
        debug!("Requesting OTP via {}", url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .context("OTP request failed")?;
        response
            .error_for_status()
            .context("OTP request rejected")?;
        Ok(())
    }

    /// Exchanges an OTP for a token set. A response without both tokens is
    /// malformed.
    pub async fn verify_otp(&self, phone: &str, otp: &str) -> Result<VerifiedSession> {
        let url = format!("{}/auth/otp/verify", self.base_url);
        let payload = json!({ "phone": normalize_phone(phone), "otp": otp });
        debug!("Verifying OTP via {}", url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .context("OTP verification request failed")?;
        let response = response
            .error_for_status()
            .context("OTP verification rejected")?;

        let parsed: VerifyResponse = response
            .json()
            .await
            .context("Invalid response from Fold")?;
        if parsed.data.access_token.is_empty() || parsed.data.refresh_token.is_empty() {
            return Err(anyhow!("Invalid response from Fold"));
        }

        debug!("OTP verified for user {}", parsed.data.user_meta.uuid);

        Ok(VerifiedSession {
            access_token: parsed.data.access_token,
            refresh_token: parsed.data.refresh_token,
            user_uuid: parsed.data.user_meta.uuid,
        })
    }
}
