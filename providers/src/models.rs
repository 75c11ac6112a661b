//! Live model listing (`GET /models`).

use serde::Deserialize;

use crate::{Client, ProviderError, check_status};

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelObject>,
}

#[derive(Debug, Deserialize)]
struct ModelObject {
    #[serde(default)]
    id: String,
}

impl Client {
    /// Fetch the identifiers of every model the key can see.
    ///
    /// Entries without an `id` are skipped.
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let response = check_status(self.get("models").send().await?).await?;
        let bytes = response.bytes().await?;
        let list: ModelList = serde_json::from_slice(&bytes)?;

        let ids: Vec<String> = list
            .data
            .into_iter()
            .map(|model| model.id)
            .filter(|id| !id.trim().is_empty())
            .collect();
        tracing::debug!(count = ids.len(), "Fetched model listing");
        Ok(ids)
    }
}
