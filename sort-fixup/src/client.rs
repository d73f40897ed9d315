//! HTTP client for the master API

use async_trait::async_trait;
use mock_core::{MasterApi, MasterApiError, MasterItem, MasterItemUpdate};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://ncd-app.altry.workers.dev";
pub const USER_AGENT: &str = "NCD-Script/department-sort/1.0";

const JSON_UTF8: &str = "application/json; charset=utf-8";

#[derive(Debug, Deserialize)]
struct ListMasterResponse {
    #[serde(default)]
    items: Vec<MasterItem>,
}

/// [`MasterApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpMasterApi {
    client: Client,
    base_url: String,
}

impl HttpMasterApi {
    pub fn new(base_url: &str) -> Result<Self, MasterApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MasterApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(error: reqwest::Error) -> MasterApiError {
    MasterApiError::Transport(error.to_string())
}

#[async_trait]
impl MasterApi for HttpMasterApi {
    async fn list_master(&self, kind: &str) -> Result<Vec<MasterItem>, MasterApiError> {
        let url = self.endpoint("/api/listMaster");
        debug!(%url, kind, "Fetching master list");

        let response = self
            .client
            .get(&url)
            .query(&[("type", kind), ("includeSimilar", "false")])
            .send()
            .await
            .map_err(transport)?;

        if response.status() != StatusCode::OK {
            return Err(MasterApiError::Status(response.status().as_u16()));
        }

        let body: ListMasterResponse = response
            .json()
            .await
            .map_err(|e| MasterApiError::Decode(e.to_string()))?;

        debug!(count = body.items.len(), "Master list received");
        Ok(body.items)
    }

    async fn update_master_item(&self, update: &MasterItemUpdate) -> Result<(), MasterApiError> {
        let payload =
            serde_json::to_vec(update).map_err(|e| MasterApiError::Decode(e.to_string()))?;

        let response = self
            .client
            .post(self.endpoint("/api/updateMasterItem"))
            .header(header::CONTENT_TYPE, JSON_UTF8)
            .body(payload)
            .send()
            .await
            .map_err(transport)?;

        if response.status() != StatusCode::OK {
            return Err(MasterApiError::Status(response.status().as_u16()));
        }

        debug!(name = %update.name, "Master item updated");
        Ok(())
    }
}
