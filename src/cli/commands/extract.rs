use crate::cli::utils::{output_content, read_schema};
use crate::cli::OutputFormat;
use crate::playground::PlaygroundClient;

pub async fn handle(url: &str, schema: &str, client: &PlaygroundClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let schema = read_schema(schema)?;
    let data = client.extract_structured_data(url, &schema).await?;
    output_content(&output_format, "data", data)
}
