//! Chat over a single resource: create collection → insert → query.
//!
//! The three calls are separate round trips, so a failure after the
//! collection exists would leave it orphaned upstream. Failures after the
//! create step delete the collection before the error is returned.

use super::{PlaygroundClient, PlaygroundError, PlaygroundResult, QueryAnswer};
use crate::ids::generate_collection_id;
use crate::upstream::ResourceType;
use crate::youtube::{is_valid_youtube_url, validate_url};

/// A collection holding one resource, kept for follow-up questions
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub collection_id: String,
    pub resource: String,
    pub resource_type: ResourceType,
    pub answer: QueryAnswer,
}

pub struct ChatSaga<'a> {
    client: &'a PlaygroundClient,
}

impl<'a> ChatSaga<'a> {
    pub fn new(client: &'a PlaygroundClient) -> Self {
        Self { client }
    }

    pub async fn start(
        &self,
        resource: &str,
        resource_type: ResourceType,
        question: &str,
    ) -> PlaygroundResult<ChatSession> {
        let resource = resource.trim();
        match resource_type {
            ResourceType::Youtube if !is_valid_youtube_url(resource) => {
                return Err(PlaygroundError::validation("Please enter a valid YouTube URL"));
            }
            ResourceType::Web => {
                validate_url(resource).map_err(PlaygroundError::validation)?;
            }
            _ => {}
        }
        if question.trim().is_empty() {
            return Err(PlaygroundError::validation("Please enter a question"));
        }

        let collection_id = generate_collection_id();
        self.client.create_collection(&collection_id).await?;
        tracing::debug!("Created collection {}", collection_id);

        if let Err(e) = self
            .client
            .insert_resource(&collection_id, resource, resource_type)
            .await
        {
            self.compensate(&collection_id, "insert").await;
            return Err(e);
        }

        match self.client.query_collection(&collection_id, question).await {
            Ok(answer) => Ok(ChatSession {
                collection_id,
                resource: resource.to_string(),
                resource_type,
                answer,
            }),
            Err(e) => {
                self.compensate(&collection_id, "query").await;
                Err(e)
            }
        }
    }

    /// Ask another question against an existing session's collection
    pub async fn ask(&self, session: &ChatSession, question: &str) -> PlaygroundResult<QueryAnswer> {
        self.client.query_collection(&session.collection_id, question).await
    }

    /// Best effort; the caller's original error wins regardless
    async fn compensate(&self, collection_id: &str, failed_step: &str) {
        tracing::info!("{} failed, deleting collection {}", failed_step, collection_id);
        if let Err(e) = self.client.delete_collection(collection_id).await {
            tracing::warn!("Could not delete collection {}: {}", collection_id, e);
        }
    }
}
