use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{save_credentials, Credentials};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::playground::PlaygroundClient;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Show whether the server accepts the current API key")]
    Status,

    #[command(about = "Validate an API key with the server and save it")]
    Login {
        #[arg(help = "Secret key from the Wetrocloud console (wtc-...)")]
        key: String,
    },
}

pub async fn handle(cmd: AuthCommands, mut client: PlaygroundClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Status => {
            let authenticated = client.check_auth().await?;
            let message = if authenticated {
                format!("Authenticated against {}", client.server_url())
            } else {
                format!("Not authenticated against {}", client.server_url())
            };
            output_success(
                &output_format,
                &message,
                Some(json!({
                    "server": client.server_url(),
                    "isAuthenticated": authenticated,
                })),
            )
        }
        AuthCommands::Login { key } => {
            client.set_api_key(&key).await?;
            save_credentials(&Credentials::new(client.server_url(), key.trim()))?;
            tracing::info!("Saved API key for {}", client.server_url());
            output_success(
                &output_format,
                "API key saved",
                Some(json!({ "server": client.server_url() })),
            )
        }
    }
}
