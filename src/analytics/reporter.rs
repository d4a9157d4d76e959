//! Fire-and-forget pageview dispatch.

use std::time::Duration;

use reqwest::header;
use serde::Serialize;

use crate::config::AnalyticsConfig;
use crate::http::request::RequestContext;

/// One pageview event, shaped for the analytics endpoint's
/// `POST /api/event` body.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsEvent {
    pub name: &'static str,
    pub url: String,
    pub domain: String,
    pub referrer: String,
}

impl AnalyticsEvent {
    /// Build a pageview event for a matched request. The URL scheme is
    /// always `https`, regardless of the transport the request arrived on.
    pub fn pageview(ctx: &RequestContext) -> Self {
        Self {
            name: "pageview",
            url: format!("https://{}{}", ctx.hostname, ctx.path),
            domain: ctx.hostname.clone(),
            referrer: ctx.referrer.clone().unwrap_or_default(),
        }
    }
}

/// Reporter owning the outbound HTTP client and endpoint configuration.
///
/// When no endpoint is configured every [`report`](Self::report) call is
/// a no-op.
pub struct AnalyticsReporter {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl AnalyticsReporter {
    pub fn new(config: &AnalyticsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Whether an endpoint is configured.
    pub fn enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Dispatch a pageview for `ctx` on a detached task.
    ///
    /// Returns immediately; the task owns all error handling. Delivery is
    /// best-effort and failures never surface to the request that
    /// triggered them.
    pub fn report(&self, ctx: &RequestContext) {
        let Some(endpoint) = self.endpoint.clone() else {
            return;
        };

        let event = AnalyticsEvent::pageview(ctx);
        let client = self.client.clone();
        let user_agent = ctx.user_agent.clone();
        let client_addr = ctx.client_addr.clone();

        tokio::spawn(async move {
            let url = format!("{}/api/event", endpoint.trim_end_matches('/'));
            let mut request = client
                .post(&url)
                .header("x-forwarded-for", client_addr)
                .json(&event);
            if let Some(agent) = user_agent {
                request = request.header(header::USER_AGENT, agent);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::trace!(url = %event.url, "pageview reported");
                }
                Ok(response) => {
                    tracing::warn!(
                        status = %response.status(),
                        url = %event.url,
                        "analytics endpoint rejected event"
                    );
                }
                Err(err) => {
                    tracing::warn!(error = %err, url = %event.url, "analytics dispatch failed");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pageview_event_shape() {
        let ctx = RequestContext {
            hostname: "example.test".to_string(),
            path: "/docs/guide".to_string(),
            client_addr: "203.0.113.9".to_string(),
            user_agent: Some("test-agent".to_string()),
            referrer: Some("https://referrer.test/".to_string()),
        };

        let event = AnalyticsEvent::pageview(&ctx);
        assert_eq!(event.name, "pageview");
        assert_eq!(event.url, "https://example.test/docs/guide");
        assert_eq!(event.domain, "example.test");
        assert_eq!(event.referrer, "https://referrer.test/");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["name"], "pageview");
        assert_eq!(json["url"], "https://example.test/docs/guide");
    }

    #[test]
    fn missing_referrer_serializes_empty() {
        let ctx = RequestContext {
            hostname: "example.test".to_string(),
            path: "/".to_string(),
            client_addr: "203.0.113.9".to_string(),
            user_agent: None,
            referrer: None,
        };

        let event = AnalyticsEvent::pageview(&ctx);
        assert_eq!(event.referrer, "");
    }
}
