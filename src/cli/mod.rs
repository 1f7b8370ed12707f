pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};

use crate::auth::ApiKey;
use crate::playground::PlaygroundClient;

#[derive(Parser)]
#[command(name = "wetro")]
#[command(about = "Wetrocloud Playground CLI - markdown, structured data and transcripts from any link")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Playground server URL (defaults to the saved server, then localhost)")]
    pub server: Option<String>,

    #[arg(long, global = true, help = "API key to use instead of the saved one")]
    pub api_key: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "API key management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Convert a web page to markdown")]
    Markdown {
        #[arg(help = "Page URL")]
        url: String,
    },

    #[command(about = "Extract structured data from a web page")]
    Extract {
        #[arg(help = "Page URL")]
        url: String,
        #[arg(long, help = "JSON schema, inline or @path/to/schema.json")]
        schema: String,
    },

    #[command(about = "Fetch the transcript of a YouTube video")]
    Transcript {
        #[arg(help = "YouTube URL")]
        url: String,
    },

    #[command(about = "Ask questions about a web page or YouTube video")]
    Chat {
        #[arg(help = "Resource URL")]
        url: String,
        #[arg(required = true, help = "Question; extra questions are asked as follow-ups")]
        questions: Vec<String>,
        #[arg(long = "type", value_enum, default_value_t = commands::chat::ChatSource::Web)]
        source: commands::chat::ChatSource,
    },
}

#[derive(Debug, Clone)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Server from the flag, else the saved one, else the local default port
fn resolve_server(cli: &Cli, saved: &config::Credentials) -> String {
    cli.server
        .clone()
        .or_else(|| saved.server.clone())
        .unwrap_or_else(|| format!("http://localhost:{}", crate::config::config().server.port))
}

/// Key from the flag, else the saved one, else `WETRO_API_KEY`
fn resolve_api_key(cli: &Cli, saved: &config::Credentials) -> anyhow::Result<Option<ApiKey>> {
    let raw = cli
        .api_key
        .clone()
        .or_else(|| saved.api_key.clone())
        .or_else(|| crate::config::config().upstream.api_key.clone());

    raw.map(|raw| ApiKey::parse(raw.trim(), false).map_err(|e| anyhow::anyhow!("Invalid API key: {}", e)))
        .transpose()
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let saved = config::load_credentials()?;

    let server = resolve_server(&cli, &saved);
    let mut client = PlaygroundClient::new(&server)?;
    if let Some(key) = resolve_api_key(&cli, &saved)? {
        client = client.with_api_key(key);
    }

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, client, output_format).await,
        Commands::Markdown { url } => commands::markdown::handle(&url, &client, output_format).await,
        Commands::Extract { url, schema } => {
            commands::extract::handle(&url, &schema, &client, output_format).await
        }
        Commands::Transcript { url } => commands::transcript::handle(&url, &client, output_format).await,
        Commands::Chat { url, questions, source } => {
            commands::chat::handle(&url, &questions, source, &client, output_format).await
        }
    }
}
