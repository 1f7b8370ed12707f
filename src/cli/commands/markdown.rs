use serde_json::Value;

use crate::cli::utils::output_content;
use crate::cli::OutputFormat;
use crate::playground::PlaygroundClient;

pub async fn handle(url: &str, client: &PlaygroundClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let markdown = client.generate_markdown(url).await?;
    output_content(&output_format, "markdown", Value::String(markdown))
}
