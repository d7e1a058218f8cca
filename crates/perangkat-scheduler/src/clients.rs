//! HTTP clients for the delegated generation endpoints.

use async_trait::async_trait;
use serde_json::json;

use perangkat_core::delegate::{GenerationOrchestrator, StructureGenerator};
use perangkat_core::{Error, ResourceId, Result};

/// Client for the endpoint that runs full document generation for a master.
pub struct HttpOrchestrator {
    client: reqwest::Client,
    url: String,
    service_key: String,
}

impl HttpOrchestrator {
    pub fn new(url: String, service_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            service_key,
        }
    }
}

#[async_trait]
impl GenerationOrchestrator for HttpOrchestrator {
    async fn orchestrate(&self, master_id: ResourceId) -> Result<()> {
        let payload = json!({ "master_id": master_id });

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Remote(format!(
                "Orchestrator error: {} {}",
                status.as_u16(),
                text
            )));
        }

        Ok(())
    }
}

/// Client for the endpoint that generates one chapter's document structure.
pub struct HttpStructureGenerator {
    client: reqwest::Client,
    url: String,
    service_key: String,
}

impl HttpStructureGenerator {
    pub fn new(url: String, service_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            service_key,
        }
    }
}

#[async_trait]
impl StructureGenerator for HttpStructureGenerator {
    async fn generate_structure(&self, bab_id: ResourceId) -> Result<()> {
        let payload = json!({ "bab_id": bab_id });

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Remote(format!(
                "Structure generation failed for bab {}: {} {}",
                bab_id,
                status.as_u16(),
                text
            )));
        }

        Ok(())
    }
}
