//! HTTP implementation of the gateway, backed by `reqwest`

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

use super::{Gateway, GatewayError, GatewayReply};

/// Gateway speaking JSON to the chat backend over HTTP.
///
/// One shared connection pool; the request timeout comes from
/// [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &EngineConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<GatewayReply, GatewayError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::timeout(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    GatewayError::network(format!("Connection failed: {e}"))
                } else {
                    GatewayError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(GatewayError::http(
                status.as_u16(),
                format!("HTTP {status}: {body}"),
            ));
        }

        parse_reply(&body)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn submit_inquiry(&self, text: &str) -> Result<GatewayReply, GatewayError> {
        self.post_json("/submit_inquiry", &InquiryBody { inquiry: text })
            .await
    }

    async fn submit_service(&self, service: &str) -> Result<GatewayReply, GatewayError> {
        self.post_json("/submit_service", &ServiceBody { service })
            .await
    }

    async fn submit_project(&self, email: &str, idea: &str) -> Result<GatewayReply, GatewayError> {
        self.post_json("/get_scope", &ScopeBody { email, idea }).await
    }

    async fn submit_contact(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<GatewayReply, GatewayError> {
        self.post_json("/contact_form", &ContactBody { email, phone })
            .await
    }
}

/// Parse a 2xx body into a reply. An empty body and an empty `message`
/// both count as no server-provided line.
fn parse_reply(body: &str) -> Result<GatewayReply, GatewayError> {
    if body.trim().is_empty() {
        return Ok(GatewayReply { message: None });
    }

    let parsed: ReplyBody = serde_json::from_str(body).map_err(|e| {
        GatewayError::invalid_response(format!("Failed to parse response: {e} - body: {body}"))
    })?;

    Ok(GatewayReply {
        message: parsed.message.filter(|m| !m.is_empty()),
    })
}

// Chat service API types

#[derive(Debug, Serialize)]
struct InquiryBody<'a> {
    inquiry: &'a str,
}

#[derive(Debug, Serialize)]
struct ServiceBody<'a> {
    service: &'a str,
}

#[derive(Debug, Serialize)]
struct ScopeBody<'a> {
    email: &'a str,
    idea: &'a str,
}

#[derive(Debug, Serialize)]
struct ContactBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    #[serde(default)]
    message: Option<String>,
}
