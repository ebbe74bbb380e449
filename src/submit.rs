use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::convert::Conversion;

pub const APP_VERSION: &str = concat!("doc2json@", env!("CARGO_PKG_VERSION"));

/// Body POSTed to the webhook: the record plus provenance metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitPayload {
    pub json: Conversion,
    pub meta: SubmitMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitMeta {
    pub source_hash: String,
    pub submitted_at: String,
    pub app_version: String,
}

/// The sheet generator may answer with a link; anything else is fine too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitResponse {
    pub sheet_url: Option<String>,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let out = hasher.finalize();
    out.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Stamp a conversion with the source document's hash, the current UTC time,
/// and this tool's version.
pub fn build_payload(conversion: Conversion, source: &str) -> SubmitPayload {
    SubmitPayload {
        json: conversion,
        meta: SubmitMeta {
            source_hash: sha256_hex(source.as_bytes()),
            submitted_at: chrono::Utc::now().to_rfc3339(),
            app_version: APP_VERSION.to_string(),
        },
    }
}

/// POST the payload as JSON. Non-2xx statuses are errors; a body that is not
/// valid JSON is treated as an empty response rather than a failure.
pub async fn submit(webhook_url: &str, payload: &SubmitPayload) -> Result<SubmitResponse> {
    let client = reqwest::Client::new();

    info!("Submitting conversion to {}", webhook_url);
    let response = client
        .post(webhook_url)
        .json(payload)
        .send()
        .await
        .context("Failed to reach webhook")?;

    let status = response.status();
    if !status.is_success() {
        bail!("Webhook returned {}", status.as_u16());
    }

    Ok(response.json::<SubmitResponse>().await.unwrap_or_default())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn payload_shape() {
        let conversion = Conversion {
            main_topic: "Widget Safety".to_string(),
            sub_topics: vec!["Keywords: spark".to_string()],
            edge_cases: vec![],
        };
        let payload = build_payload(conversion, "source text");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["json"]["main_topic"], "Widget Safety");
        assert_eq!(json["meta"]["source_hash"], sha256_hex(b"source text"));
        assert_eq!(json["meta"]["app_version"], APP_VERSION);
        assert!(json["meta"]["submitted_at"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn version_string_shape() {
        assert!(APP_VERSION.starts_with("doc2json@"));
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let parsed: SubmitResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.sheet_url.is_none());
        let parsed: SubmitResponse =
            serde_json::from_str(r#"{"sheet_url":"https://sheets.example/abc"}"#).unwrap();
        assert_eq!(parsed.sheet_url.as_deref(), Some("https://sheets.example/abc"));
    }
}
