use std::io::Read;

use anyhow::{bail, Result};
use axum::http::header::CONTENT_ENCODING;
use axum::http::HeaderMap;
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;

use matchtrack_domain::RuntimeConfig;

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Decodes a JSON body, inflating it first when sent with `Content-Encoding: gzip`.
///
/// `max_bytes` bounds the decoded body, so a small compressed request cannot
/// expand past the configured body limit.
pub fn parse_payload<T: DeserializeOwned>(
    headers: &HeaderMap,
    body: &[u8],
    max_bytes: u64,
) -> Result<T> {
    let content = maybe_gunzip(headers, body, max_bytes)?;
    Ok(serde_json::from_slice(&content)?)
}

fn maybe_gunzip(headers: &HeaderMap, body: &[u8], max_bytes: u64) -> Result<Vec<u8>> {
    let is_gzip = headers
        .get(CONTENT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("gzip"));
    if !is_gzip {
        return Ok(body.to_vec());
    }

    let mut out = Vec::new();
    GzDecoder::new(body)
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut out)?;
    if out.len() as u64 > max_bytes {
        bail!("decompressed body exceeds {} bytes", max_bytes);
    }
    Ok(out)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use axum::http::HeaderValue;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use matchtrack_application::dtos::SendLikeRequest;

    use super::*;

    fn config(api_token: Option<&str>) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: api_token.map(ToString::to_string),
            max_body_bytes: 1024,
            request_timeout_seconds: 5,
        }
    }

    #[test]
    fn open_access_without_configured_token() {
        assert!(authorize(&config(None), &HeaderMap::new()));
    }

    #[test]
    fn bearer_token_must_match() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer secret"));
        assert!(authorize(&config(Some("secret")), &headers));
        assert!(!authorize(&config(Some("other")), &headers));

        headers.insert("Authorization", HeaderValue::from_static("Basic secret"));
        assert!(!authorize(&config(Some("secret")), &headers));
    }

    #[test]
    fn gzip_bodies_are_inflated() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(br#"{"sender_id": 1, "receiver_id": 2}"#)
            .expect("compress body");
        let body = encoder.finish().expect("finish gzip");

        let mut headers = HeaderMap::new();
        headers.insert("Content-Encoding", HeaderValue::from_static("gzip"));
        let payload: SendLikeRequest =
            parse_payload(&headers, &body, 1024).expect("parse payload");
        assert_eq!(payload.sender_id, 1);
        assert_eq!(payload.receiver_id, 2);
    }

    #[test]
    fn inflated_body_is_capped() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder
            .write_all(&vec![b' '; 64 * 1024])
            .expect("compress body");
        let body = encoder.finish().expect("finish gzip");
        assert!(body.len() < 1024);

        let mut headers = HeaderMap::new();
        headers.insert("Content-Encoding", HeaderValue::from_static("gzip"));
        let err = maybe_gunzip(&headers, &body, 1024).expect_err("over the limit");
        assert!(err.to_string().contains("exceeds 1024 bytes"));

        let inflated = maybe_gunzip(&headers, &body, 64 * 1024).expect("exactly at the limit");
        assert_eq!(inflated.len(), 64 * 1024);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result: Result<SendLikeRequest> =
            parse_payload(&HeaderMap::new(), b"{\"sender_id\":", 1024);
        assert!(result.is_err());
    }
}
