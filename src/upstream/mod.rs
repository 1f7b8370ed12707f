//! The Wetrocloud extraction service, reached over HTTP.
//!
//! Handlers only ever see the [`WetroApi`] trait so tests can count calls
//! against a recording implementation.

mod client;

pub use client::WetroClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::auth::ApiKey;
use crate::client::ClientResult;

/// Kinds of resource the service can ingest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Web,
    Youtube,
    File,
    Text,
    Json,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Web => "web",
            ResourceType::Youtube => "youtube",
            ResourceType::File => "file",
            ResourceType::Text => "text",
            ResourceType::Json => "json",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(ResourceType::Web),
            "youtube" => Ok(ResourceType::Youtube),
            "file" => Ok(ResourceType::File),
            "text" => Ok(ResourceType::Text),
            "json" => Ok(ResourceType::Json),
            other => Err(format!("Unsupported resource_type '{}'", other)),
        }
    }
}

/// Operations the playground forwards. Each is exactly one upstream round trip.
#[async_trait]
pub trait WetroApi: Send + Sync {
    async fn create_collection(&self, key: &ApiKey, collection_id: &str) -> ClientResult<Value>;

    async fn delete_collection(&self, key: &ApiKey, collection_id: &str) -> ClientResult<Value>;

    async fn insert_resource(
        &self,
        key: &ApiKey,
        collection_id: &str,
        resource: &str,
        resource_type: ResourceType,
    ) -> ClientResult<Value>;

    async fn query_collection(
        &self,
        key: &ApiKey,
        collection_id: &str,
        request_query: &str,
    ) -> ClientResult<Value>;

    async fn markdown_converter(
        &self,
        key: &ApiKey,
        resource: &str,
        resource_type: ResourceType,
    ) -> ClientResult<Value>;

    async fn extract(&self, key: &ApiKey, website: &str, json_schema: &Value) -> ClientResult<Value>;

    async fn transcript(
        &self,
        key: &ApiKey,
        resource: &str,
        resource_type: ResourceType,
    ) -> ClientResult<Value>;
}
