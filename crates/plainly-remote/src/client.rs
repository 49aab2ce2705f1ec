//! HTTP client for the simplification service

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tokio::time::timeout;

use plainly_core::{
    CollaboratorError, ComplexityLevel, Error, Result, SimplificationResult, Simplifier,
};

use crate::config::RemoteConfig;

/// Calls a simplification service over HTTP
pub struct RemoteSimplifier {
    config: RemoteConfig,
    client: Client,
}

#[derive(Serialize)]
struct SimplifyRequest<'a> {
    text: &'a str,
    level: ComplexityLevel,
}

impl RemoteSimplifier {
    /// Create a new client from configuration
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = RemoteConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    async fn perform_request(
        &self,
        text: &str,
        level: ComplexityLevel,
    ) -> std::result::Result<SimplificationResult, CollaboratorError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .header("Accept", "application/json")
            .json(&SimplifyRequest { text, level })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CollaboratorError::Timeout(self.config.timeout_secs)
                } else {
                    CollaboratorError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CollaboratorError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(CollaboratorError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}

/// Decode the service's JSON answer
pub(crate) fn parse_response(
    body: &str,
) -> std::result::Result<SimplificationResult, CollaboratorError> {
    let result: SimplificationResult = serde_json::from_str(body)
        .map_err(|e| CollaboratorError::MalformedResponse(e.to_string()))?;

    if result.simplified.trim().is_empty() {
        return Err(CollaboratorError::MalformedResponse(
            "empty simplified text".to_string(),
        ));
    }

    Ok(result)
}

#[async_trait]
impl Simplifier for RemoteSimplifier {
    async fn simplify(&self, text: &str, level: ComplexityLevel) -> Result<SimplificationResult> {
        tracing::debug!(url = %self.config.api_url, %level, "posting simplify request");

        match timeout(self.config.timeout(), self.perform_request(text, level)).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "simplify request failed");
                Err(Error::Collaborator(e))
            }
            Err(_) => Err(Error::Collaborator(CollaboratorError::Timeout(
                self.config.timeout_secs,
            ))),
        }
    }

    fn name(&self) -> &str {
        "remote"
    }
}
