//! Outbound gateway boundary
//!
//! The engine talks to the backing web service only through the [`Gateway`]
//! trait, so tests can swap in mock implementations.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

mod http;

pub use http::HttpGateway;

/// Reply payload from a gateway endpoint.
///
/// `message` is the optional server-provided bot line; an empty string is
/// normalized to `None` by the HTTP implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub message: Option<String>,
}

/// Error from a gateway call.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

/// Classification of gateway failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Request exceeded the configured timeout
    Timeout,
    /// Could not reach the service
    Connect,
    /// Service answered with a non-2xx status
    Http { status: u16 },
    /// Response body was not valid JSON for the endpoint
    InvalidResponse,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Timeout, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Connect, message)
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Http { status }, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidResponse, message)
    }
}

/// Abstraction over the outbound chat service.
///
/// One method per endpoint; all return the parsed reply or a classified
/// error. Implementations must be safe to call from spawned tasks.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Submit a free-text inquiry.
    async fn submit_inquiry(&self, text: &str) -> Result<GatewayReply, GatewayError>;

    /// Request details for a selected service.
    async fn submit_service(&self, service: &str) -> Result<GatewayReply, GatewayError>;

    /// Submit the project intake form.
    async fn submit_project(&self, email: &str, idea: &str) -> Result<GatewayReply, GatewayError>;

    /// Submit contact details collected by the browsing sub-flow.
    async fn submit_contact(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<GatewayReply, GatewayError>;
}

#[async_trait]
impl<T: Gateway + ?Sized> Gateway for Arc<T> {
    async fn submit_inquiry(&self, text: &str) -> Result<GatewayReply, GatewayError> {
        (**self).submit_inquiry(text).await
    }

    async fn submit_service(&self, service: &str) -> Result<GatewayReply, GatewayError> {
        (**self).submit_service(service).await
    }

    async fn submit_project(&self, email: &str, idea: &str) -> Result<GatewayReply, GatewayError> {
        (**self).submit_project(email, idea).await
    }

    async fn submit_contact(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<GatewayReply, GatewayError> {
        (**self).submit_contact(email, phone).await
    }
}
