use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde_json::{json, Value};

use super::{ResourceType, WetroApi};
use crate::auth::ApiKey;
use crate::client::{ClientError, ClientResult, HttpClient};
use crate::config::UpstreamConfig;

const COLLECTION_CREATE: &str = "/v1/collection/create/";
const COLLECTION_DELETE: &str = "/v1/collection/delete/";
const RESOURCE_INSERT: &str = "/v1/resource/insert/";
const COLLECTION_QUERY: &str = "/v1/collection/query/";
const MARKDOWN_CONVERTER: &str = "/v1/markdown-converter/";
const DATA_EXTRACTION: &str = "/v1/data-extraction/";
const TRANSCRIPT: &str = "/v2/transcript/";

/// HTTP implementation of [`WetroApi`]
#[derive(Clone)]
pub struct WetroClient {
    http: HttpClient,
    transcript_http: HttpClient,
}

impl WetroClient {
    pub fn new(config: &UpstreamConfig) -> ClientResult<Self> {
        let http = HttpClient::new(&config.base_url, Some(config.timeout()))?;
        let transcript_http = http.with_timeout(config.transcript_timeout());
        Ok(Self { http, transcript_http })
    }

    fn auth_headers(key: &ApiKey) -> ClientResult<HeaderMap> {
        let value = HeaderValue::from_str(&format!("Token {}", key.as_str()))
            .map_err(|_| ClientError::Configuration("API key is not a valid header value".into()))?;
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    async fn post(&self, key: &ApiKey, path: &str, body: Value) -> ClientResult<Value> {
        self.http
            .request(Method::POST, path, Some(&body), Self::auth_headers(key)?)
            .await
    }
}

#[async_trait]
impl WetroApi for WetroClient {
    async fn create_collection(&self, key: &ApiKey, collection_id: &str) -> ClientResult<Value> {
        self.post(key, COLLECTION_CREATE, json!({ "collection_id": collection_id }))
            .await
    }

    async fn delete_collection(&self, key: &ApiKey, collection_id: &str) -> ClientResult<Value> {
        let body = json!({ "collection_id": collection_id });
        self.http
            .request(Method::DELETE, COLLECTION_DELETE, Some(&body), Self::auth_headers(key)?)
            .await
    }

    async fn insert_resource(
        &self,
        key: &ApiKey,
        collection_id: &str,
        resource: &str,
        resource_type: ResourceType,
    ) -> ClientResult<Value> {
        self.post(
            key,
            RESOURCE_INSERT,
            json!({
                "collection_id": collection_id,
                "resource": resource,
                "type": resource_type,
            }),
        )
        .await
    }

    async fn query_collection(
        &self,
        key: &ApiKey,
        collection_id: &str,
        request_query: &str,
    ) -> ClientResult<Value> {
        self.post(
            key,
            COLLECTION_QUERY,
            json!({
                "collection_id": collection_id,
                "request_query": request_query,
            }),
        )
        .await
    }

    async fn markdown_converter(
        &self,
        key: &ApiKey,
        resource: &str,
        resource_type: ResourceType,
    ) -> ClientResult<Value> {
        self.post(
            key,
            MARKDOWN_CONVERTER,
            json!({
                "link": resource,
                "resource_type": resource_type,
            }),
        )
        .await
    }

    async fn extract(&self, key: &ApiKey, website: &str, json_schema: &Value) -> ClientResult<Value> {
        self.post(
            key,
            DATA_EXTRACTION,
            json!({
                "link": website,
                "json_schema": json_schema,
            }),
        )
        .await
    }

    async fn transcript(
        &self,
        key: &ApiKey,
        resource: &str,
        resource_type: ResourceType,
    ) -> ClientResult<Value> {
        let body = json!({
            "link": resource,
            "resource_type": resource_type,
        });
        self.transcript_http
            .request(Method::POST, TRANSCRIPT, Some(&body), Self::auth_headers(key)?)
            .await
    }
}
