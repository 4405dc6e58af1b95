//! Supabase-backed quest store (PostgREST over HTTPS)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use questlens_domain::{CacheVersion, Quest, World, WorldSlug};

use super::query::TableQuery;
use crate::ports::outbound::{QuestStorePort, RemoteFetchError};

pub const WORLDS_TABLE: &str = "worlds";
pub const QUESTS_TABLE: &str = "story_quests";
pub const METADATA_TABLE: &str = "app_metadata";

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Deserialize)]
struct MetadataRow {
    value: serde_json::Value,
}

/// Read-only client for the quest tables.
#[derive(Clone)]
pub struct SupabaseQuestStore {
    client: Client,
    base_url: Url,
    anon_key: String,
    version_key: String,
}

impl SupabaseQuestStore {
    pub fn new(
        base_url: &str,
        anon_key: impl Into<String>,
        version_key: impl Into<String>,
    ) -> Result<Self, RemoteFetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
            anon_key: anon_key.into(),
            version_key: version_key.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: TableQuery,
    ) -> Result<Vec<T>, RemoteFetchError> {
        let url = query.to_url(&self.base_url)?;
        tracing::debug!(operation, table = query.table_name(), "Querying quest store");

        let response = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| RemoteFetchError::transport(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteFetchError::Status {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RemoteFetchError::transport(operation, e))?;
        decode_rows(operation, &body)
    }
}

#[async_trait]
impl QuestStorePort for SupabaseQuestStore {
    async fn current_version(&self) -> Result<Option<CacheVersion>, RemoteFetchError> {
        let rows: Vec<MetadataRow> = self
            .fetch_rows(
                "current_version",
                TableQuery::table(METADATA_TABLE)
                    .select(&["value"])
                    .eq("key", self.version_key.as_str())
                    .limit(1),
            )
            .await?;
        version_from_rows(rows)
    }

    async fn list_worlds(&self) -> Result<Vec<World>, RemoteFetchError> {
        self.fetch_rows(
            "list_worlds",
            TableQuery::table(WORLDS_TABLE).order_asc("story_order"),
        )
        .await
    }

    async fn list_quests(&self, world: &WorldSlug) -> Result<Vec<Quest>, RemoteFetchError> {
        self.fetch_rows(
            "list_quests",
            TableQuery::table(QUESTS_TABLE)
                .eq("world_slug", world.as_str())
                .order_asc("story_order"),
        )
        .await
    }
}

/// Parse the project URL, keeping any path prefix as a directory.
fn normalize_base_url(raw: &str) -> Result<Url, RemoteFetchError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&with_slash).map_err(|e| RemoteFetchError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RemoteFetchError::InvalidUrl(format!(
            "unsupported scheme {other}"
        ))),
    }
}

fn decode_rows<T: DeserializeOwned>(
    operation: &'static str,
    body: &str,
) -> Result<Vec<T>, RemoteFetchError> {
    serde_json::from_str(body).map_err(|e| RemoteFetchError::decode(operation, e))
}

fn version_from_rows(rows: Vec<MetadataRow>) -> Result<Option<CacheVersion>, RemoteFetchError> {
    let Some(row) = rows.into_iter().next() else {
        return Ok(None);
    };
    if row.value.is_null() {
        return Ok(None);
    }
    CacheVersion::from_json(&row.value)
        .map(Some)
        .map_err(|e| RemoteFetchError::decode("current_version", e))
}
