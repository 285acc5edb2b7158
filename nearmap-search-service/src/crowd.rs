//! Crowd-level enrichment against the external occupancy provider.
//!
//! Enrichment is best effort: any transport or payload failure is logged
//! and the response ships without crowd data rather than failing the
//! search.

use std::fmt;

use nearmap_core::with_retry;
use nearmap_search_protocol::PoiGroup;
use serde_json::Value;

use crate::config::CrowdConfig;
use crate::group::CrowdCandidate;

/// Failures inside a crowd lookup. Never escapes [`CrowdClient::enrich`].
#[derive(Debug, thiserror::Error)]
pub enum CrowdError {
    #[error("crowd request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed crowd response: {0}")]
    Malformed(String),
}

/// One classified occupancy sample from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CrowdSample {
    id: String,
    level: u8,
}

/// HTTP client for the crowd occupancy endpoint.
pub struct CrowdClient {
    http: reqwest::Client,
    config: CrowdConfig,
}

impl fmt::Debug for CrowdClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrowdClient")
            .field("address", &self.config.address)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl CrowdClient {
    pub fn new(config: CrowdConfig) -> Result<Self, CrowdError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_millis(config.connect_timeout_ms))
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { http, config })
    }

    /// Write crowd levels into the candidate entries. Returns whether any
    /// entry received a classification.
    ///
    /// All ids are sent in one query; the provider paginates via `Link`
    /// headers and every page is drained before applying. On failure the
    /// groups are left at their level-0 defaults.
    pub async fn enrich(&self, groups: &mut [PoiGroup], candidates: &[CrowdCandidate]) -> bool {
        if candidates.is_empty() {
            return false;
        }

        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        let samples = match self.fetch_all(&ids.join(",")).await {
            Ok(samples) => samples,
            Err(error) => {
                tracing::warn!(%error, ids = candidates.len(), "crowd enrichment failed");
                return false;
            }
        };

        // Each sample is applied to the first candidate carrying its id;
        // ids are expected unique on both sides.
        let mut classified = false;
        for sample in &samples {
            if let Some(candidate) = candidates.iter().find(|c| c.id == sample.id) {
                groups[candidate.group].list[candidate.entry].crowd_lv = Some(sample.level);
                classified = true;
            }
        }
        classified
    }

    /// Drain every page of the provider response.
    async fn fetch_all(&self, ids: &str) -> Result<Vec<CrowdSample>, CrowdError> {
        let mut url = format!("{}?id={}", self.config.address, ids);
        let mut samples = Vec::new();
        let mut page_number = 1u32;
        loop {
            let page = with_retry(self.config.retry, || self.fetch_page(&url), "crowd lookup")
                .await?;
            tracing::debug!(page = page_number, samples = page.0.len(), "crowd page fetched");
            samples.extend(page.0);
            match page.1 {
                Some(next) => url = next,
                None => break,
            }
            page_number += 1;
        }
        Ok(samples)
    }

    async fn fetch_page(
        &self,
        url: &str,
    ) -> Result<(Vec<CrowdSample>, Option<String>), CrowdError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.token)
            .send()
            .await?
            .error_for_status()?;

        let next = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_link);

        let body: Value = response.json().await?;
        Ok((parse_samples(&body)?, next))
    }
}

/// Extract the next-page target from a `Link` header value.
///
/// Prefers the part tagged `rel="next"`, falling back to the first
/// bracketed URL: the provider also sends bare `<url>` headers with no
/// rel attribute, and those still chain pages.
fn next_link(header: &str) -> Option<String> {
    header
        .split(',')
        .find(|part| part.contains("rel=\"next\""))
        .and_then(bracketed_url)
        .or_else(|| bracketed_url(header))
}

fn bracketed_url(s: &str) -> Option<String> {
    let start = s.find('<')? + 1;
    let end = s.find('>')?;
    (start <= end).then(|| s[start..end].to_string())
}

/// Parse the provider's sample array. Entries without a lamp are skipped;
/// a lamp with an unknown or missing color classifies at level 0.
fn parse_samples(body: &Value) -> Result<Vec<CrowdSample>, CrowdError> {
    let entries = body
        .as_array()
        .ok_or_else(|| CrowdError::Malformed("expected a top-level array".to_string()))?;

    let mut samples = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(id) = entry.get("id").and_then(id_string) else {
            continue;
        };
        let lamp = entry.get("crowd_lamp");
        let Some(lamp) = lamp.filter(|v| !v.is_null()) else {
            continue;
        };
        let color = lamp.get("color").and_then(Value::as_str).unwrap_or("");
        samples.push(CrowdSample {
            id,
            level: level_for_color(color),
        });
    }
    Ok(samples)
}

/// Lamp color to occupancy level. Unknown colors are classified, at 0.
fn level_for_color(color: &str) -> u8 {
    match color {
        "red" => 3,
        "yellow" => 2,
        "green" | "blue" => 1,
        _ => 0,
    }
}

/// Provider ids appear both as JSON strings and numbers.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
