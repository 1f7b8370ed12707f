use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use super::{AccessToken, DashboardClient};
use crate::client::ClientResult;
use crate::ids::random_alphanumeric;

const LIST_ORGANIZATIONS: &str = "/dashboard/get-organization/";
const CREATE_ORGANIZATION: &str = "/dashboard/create-organization/";

/// Length of the generated name for organizations created on the visitor's behalf
const GENERATED_NAME_LENGTH: usize = 6;

#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub organization_id: String,
    #[serde(default)]
    pub created_by: Option<Creator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub fullname: String,
}

/// Organization chosen for this session plus the name shown in the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOrganization {
    pub organization_id: String,
    pub display_name: String,
    pub created: bool,
}

impl Organization {
    fn creator_name(&self) -> Option<String> {
        self.created_by
            .as_ref()
            .map(|c| c.fullname.trim().to_string())
            .filter(|name| !name.is_empty())
    }
}

impl DashboardClient {
    pub async fn list_organizations(&self, token: &AccessToken) -> ClientResult<Vec<Organization>> {
        self.http
            .request_data(Method::GET, LIST_ORGANIZATIONS, None, Self::bearer_headers(token)?)
            .await
    }

    pub async fn create_organization(
        &self,
        token: &AccessToken,
        name: &str,
    ) -> ClientResult<Organization> {
        let body = json!({ "name": name });
        self.http
            .request_data(Method::POST, CREATE_ORGANIZATION, Some(&body), Self::bearer_headers(token)?)
            .await
    }

    /// Use the first listed organization, creating one only when the list is empty
    pub async fn get_organization_id(&self, token: &AccessToken) -> ClientResult<ResolvedOrganization> {
        let organizations = self.list_organizations(token).await?;

        if let Some(first) = organizations.into_iter().next() {
            tracing::debug!("Using existing organization {}", first.organization_id);
            let display_name = first.creator_name().unwrap_or_default();
            return Ok(ResolvedOrganization {
                organization_id: first.organization_id,
                display_name,
                created: false,
            });
        }

        let name = random_alphanumeric(GENERATED_NAME_LENGTH);
        let created = self.create_organization(token, &name).await?;
        tracing::info!("Created organization {}", created.organization_id);

        let display_name = created
            .creator_name()
            .unwrap_or_else(|| random_alphanumeric(GENERATED_NAME_LENGTH));
        Ok(ResolvedOrganization {
            organization_id: created.organization_id,
            display_name,
            created: true,
        })
    }
}
