use serde_json::Value;

use crate::cli::utils::output_content;
use crate::cli::OutputFormat;
use crate::playground::PlaygroundClient;

pub async fn handle(url: &str, client: &PlaygroundClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let transcript = client.fetch_youtube_transcript(url).await?;
    if transcript.is_empty() {
        tracing::warn!("No transcript available for {}", url);
    }
    output_content(&output_format, "transcript", Value::String(transcript))
}
