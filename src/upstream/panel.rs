//! Panel application-API client.
//!
//! The one upstream query the service needs: the full server list for a
//! panel user, fetched through the application API with bearer auth.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::PanelConfig;
use crate::error::{ResourceError, Result};
use crate::resources::types::ServerRecord;

/// Boundary to the upstream resource provider. The production implementation
/// talks HTTP; tests substitute their own.
#[async_trait]
pub trait ServerSource: Send + Sync {
    async fn fetch_user_servers(&self, user_id: u32) -> Result<Vec<ServerRecord>>;
}

// ========================================
// HTTP CLIENT
// ========================================

pub struct PanelClient {
    config: PanelConfig,
    http_client: reqwest::Client,
}

impl PanelClient {
    pub fn new(config: PanelConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl ServerSource for PanelClient {
    async fn fetch_user_servers(&self, user_id: u32) -> Result<Vec<ServerRecord>> {
        let url = format!(
            "{}/api/application/users/{}?include=servers",
            self.config.api_url, user_id
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResourceError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let detail: UserDetail = serde_json::from_str(&body)
            .map_err(|_| ResourceError::MalformedResponse("unexpected response body"))?;

        let relationships = detail
            .attributes
            .relationships
            .ok_or(ResourceError::MalformedResponse("missing relationships in response"))?;
        let servers = relationships
            .servers
            .ok_or(ResourceError::MalformedResponse("missing servers in response"))?;

        Ok(servers.data.into_iter().map(|s| s.attributes).collect())
    }
}

// ========================================
// RESPONSE SHAPE
// ========================================

#[derive(Deserialize)]
struct UserDetail {
    attributes: UserAttributes,
}

#[derive(Deserialize)]
struct UserAttributes {
    relationships: Option<UserRelationships>,
}

#[derive(Deserialize)]
struct UserRelationships {
    servers: Option<ServerList>,
}

#[derive(Deserialize)]
struct ServerList {
    data: Vec<ServerEnvelope>,
}

#[derive(Deserialize)]
struct ServerEnvelope {
    attributes: ServerRecord,
}
