use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::{Client, StatusCode};
use sha2::Sha256;

use matchtrack_domain::{current_millis, EventEnvelope, EventPusher, TrackingEvent};

pub const SIGNATURE_HEADER: &str = "X-Matchtrack-Signature";

type HmacSha256 = Hmac<Sha256>;

/// Forwards each event as a JSON envelope to an HTTP collector.
pub struct HttpEventSink {
    client: Client,
    url: String,
    secret: Option<String>,
}

impl HttpEventSink {
    pub fn new(url: String, secret: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            client,
            url,
            secret,
        })
    }
}

#[async_trait]
impl EventPusher for HttpEventSink {
    async fn push(&self, event: TrackingEvent) -> anyhow::Result<()> {
        let envelope = EventEnvelope::wrap(&event, current_millis())?;
        let body = serde_json::to_vec(&envelope)?;

        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json");
        if let Some(secret) = &self.secret {
            request = request.header(SIGNATURE_HEADER, sign_hmac_sha256(secret, &body)?);
        }

        request.body(body).send().await?.error_for_status()?;
        Ok(())
    }

    /// Any answer below 500 means the collector is up, even if it only takes POST.
    async fn ping(&self) -> anyhow::Result<()> {
        let response = self.client.head(&self.url).send().await?;
        ensure_reachable(response.status())
    }
}

fn ensure_reachable(status: StatusCode) -> Result<()> {
    if status.is_server_error() {
        anyhow::bail!("event collector responded {}", status);
    }
    Ok(())
}

fn sign_hmac_sha256(secret: &str, payload: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| anyhow!("hmac init failed: {err}"))?;
    mac.update(payload);
    let digest = mac.finalize().into_bytes();

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    Ok(out)
}
