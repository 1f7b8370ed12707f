use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use super::{AccessToken, DashboardClient};
use crate::client::ClientResult;

const LIST_API_KEYS: &str = "/dashboard/get-api-key";
const CREATE_API_KEY: &str = "/dashboard/create-api-key/";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyRecord {
    #[serde(rename = "SecretKey")]
    pub secret_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedKey {
    pub secret_key: String,
    pub created: bool,
}

impl DashboardClient {
    pub async fn list_api_keys(
        &self,
        token: &AccessToken,
        organization_id: &str,
    ) -> ClientResult<Vec<ApiKeyRecord>> {
        let path = format!("{}/{}", LIST_API_KEYS, organization_id);
        self.http
            .request_data(Method::GET, &path, None, Self::bearer_headers(token)?)
            .await
    }

    pub async fn create_api_key(
        &self,
        token: &AccessToken,
        organization_id: &str,
    ) -> ClientResult<ApiKeyRecord> {
        let body = json!({ "organization_id": organization_id });
        self.http
            .request_data(Method::POST, CREATE_API_KEY, Some(&body), Self::bearer_headers(token)?)
            .await
    }

    /// Reuse the first key of the organization, minting one only when it has none
    pub async fn get_api_key(
        &self,
        token: &AccessToken,
        organization_id: &str,
    ) -> ClientResult<ProvisionedKey> {
        let keys = self.list_api_keys(token, organization_id).await?;

        if let Some(first) = keys.into_iter().next() {
            return Ok(ProvisionedKey {
                secret_key: first.secret_key,
                created: false,
            });
        }

        let created = self.create_api_key(token, organization_id).await?;
        tracing::info!("Created API key for organization {}", organization_id);
        Ok(ProvisionedKey {
            secret_key: created.secret_key,
            created: true,
        })
    }
}
