use clap::ValueEnum;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::playground::{ChatSaga, PlaygroundClient, QueryAnswer};
use crate::upstream::ResourceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChatSource {
    Web,
    Youtube,
}

impl From<ChatSource> for ResourceType {
    fn from(source: ChatSource) -> Self {
        match source {
            ChatSource::Web => ResourceType::Web,
            ChatSource::Youtube => ResourceType::Youtube,
        }
    }
}

/// Ask the first question through the saga, the rest against the same collection
pub async fn handle(
    url: &str,
    questions: &[String],
    source: ChatSource,
    client: &PlaygroundClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let Some((first, follow_ups)) = questions.split_first() else {
        return Err(anyhow::anyhow!("Please enter a question"));
    };

    let saga = ChatSaga::new(client);
    let session = saga.start(url, source.into(), first).await?;

    let mut exchanges = vec![(first.clone(), session.answer.clone())];
    for question in follow_ups {
        let answer = saga.ask(&session, question).await?;
        exchanges.push((question.clone(), answer));
    }

    match output_format {
        OutputFormat::Json => {
            let exchanges: Vec<Value> = exchanges
                .iter()
                .map(|(question, answer)| {
                    json!({
                        "question": question,
                        "response": answer.response,
                        "metadata": answer.metadata,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": true,
                    "collection_id": session.collection_id,
                    "resource_type": session.resource_type,
                    "exchanges": exchanges,
                }))?
            );
        }
        OutputFormat::Text => {
            for (question, answer) in &exchanges {
                println!("> {}", question);
                println!("{}\n", render_answer(answer)?);
            }
        }
    }
    Ok(())
}

fn render_answer(answer: &QueryAnswer) -> anyhow::Result<String> {
    Ok(match &answer.response {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other)?,
    })
}
