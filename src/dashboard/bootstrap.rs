//! Session bootstrap: access token → organization → secret key.
//!
//! The token is acquired once and threaded through the later steps. Any
//! 401 from the dashboard ends the run with [`BootstrapOutcome::LoginRequired`].

use async_trait::async_trait;

use super::pipeline::{run_step, Step, StepFailure, StepPolicy};
use super::{AccessToken, DashboardClient, ProvisionedKey, ResolvedOrganization};
use crate::client::ClientError;

/// Everything a successful bootstrap yields. Nothing here is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSession {
    pub secret_key: String,
    pub organization_id: String,
    /// Name shown next to the avatar
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub enum BootstrapOutcome {
    Provisioned(BootstrapSession),
    LoginRequired { redirect_url: String },
    Failed { step: &'static str, error: ClientError },
}

pub struct AcquireToken {
    client: DashboardClient,
}

pub struct ResolveOrganization {
    client: DashboardClient,
}

pub struct ProvisionApiKey {
    client: DashboardClient,
}

#[async_trait]
impl Step for AcquireToken {
    type Input = Option<String>;
    type Output = AccessToken;

    fn name(&self) -> &'static str {
        "acquire_token"
    }

    async fn execute(&self, session_cookie: Option<String>) -> Result<AccessToken, ClientError> {
        self.client.get_access_token(session_cookie.as_deref()).await
    }
}

#[async_trait]
impl Step for ResolveOrganization {
    type Input = AccessToken;
    type Output = (AccessToken, ResolvedOrganization);

    fn name(&self) -> &'static str {
        "resolve_organization"
    }

    async fn execute(
        &self,
        token: AccessToken,
    ) -> Result<(AccessToken, ResolvedOrganization), ClientError> {
        let organization = self.client.get_organization_id(&token).await?;
        Ok((token, organization))
    }
}

#[async_trait]
impl Step for ProvisionApiKey {
    type Input = (AccessToken, ResolvedOrganization);
    type Output = (ResolvedOrganization, ProvisionedKey);

    fn name(&self) -> &'static str {
        "provision_api_key"
    }

    async fn execute(
        &self,
        (token, organization): (AccessToken, ResolvedOrganization),
    ) -> Result<(ResolvedOrganization, ProvisionedKey), ClientError> {
        let key = self
            .client
            .get_api_key(&token, &organization.organization_id)
            .await?;
        Ok((organization, key))
    }
}

pub struct Bootstrap {
    acquire_token: AcquireToken,
    resolve_organization: ResolveOrganization,
    provision_api_key: ProvisionApiKey,
    policy: StepPolicy,
    login_url: String,
}

impl Bootstrap {
    /// `login_url` is where the visitor goes when the dashboard has no session for them
    pub fn new(client: DashboardClient, policy: StepPolicy, login_url: impl Into<String>) -> Self {
        Self {
            acquire_token: AcquireToken { client: client.clone() },
            resolve_organization: ResolveOrganization { client: client.clone() },
            provision_api_key: ProvisionApiKey { client },
            policy,
            login_url: login_url.into(),
        }
    }

    pub async fn run(&self, session_cookie: Option<String>) -> BootstrapOutcome {
        match self.run_steps(session_cookie).await {
            Ok(session) => {
                tracing::info!(
                    organization_id = %session.organization_id,
                    "bootstrap provisioned an API key"
                );
                BootstrapOutcome::Provisioned(session)
            }
            Err(failure) if failure.error.is_unauthorized() => {
                tracing::info!(step = failure.step, "dashboard session missing, login required");
                BootstrapOutcome::LoginRequired {
                    redirect_url: self.login_url.clone(),
                }
            }
            Err(failure) => {
                tracing::error!(
                    step = failure.step,
                    attempts = failure.attempts,
                    "bootstrap failed: {}",
                    failure.error
                );
                BootstrapOutcome::Failed {
                    step: failure.step,
                    error: failure.error,
                }
            }
        }
    }

    async fn run_steps(&self, session_cookie: Option<String>) -> Result<BootstrapSession, StepFailure> {
        let token = run_step(&self.acquire_token, session_cookie, &self.policy).await?;
        let resolved = run_step(&self.resolve_organization, token, &self.policy).await?;
        let (organization, key) = run_step(&self.provision_api_key, resolved, &self.policy).await?;

        tracing::info!(
            organization_created = organization.created,
            key_created = key.created,
            "dashboard resources resolved"
        );

        Ok(BootstrapSession {
            secret_key: key.secret_key,
            organization_id: organization.organization_id,
            display_name: organization.display_name,
        })
    }
}
