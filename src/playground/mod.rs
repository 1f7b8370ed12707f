//! Client for the playground's own routes, used by the `wetro` CLI.
//!
//! This is the half of the playground that ran in the browser: it validates
//! input before sending it, carries the key cookie on every request and turns
//! failures into messages fit for a person.

mod client;
mod saga;

pub use client::{PlaygroundClient, QueryAnswer};
pub use saga::{ChatSaga, ChatSession};

use thiserror::Error;

use crate::client::ClientError;

pub type PlaygroundResult<T> = Result<T, PlaygroundError>;

#[derive(Debug, Error)]
pub enum PlaygroundError {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    #[error("Authentication required. Set an API key with `wetro auth login <key>`")]
    AuthenticationRequired,

    /// The server answered with an error; `message` is its `error` field
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Please check your internet connection and try again. If the problem persists, reach out to hello@wetrocloud.com for help")]
    Connectivity,

    #[error("An error occurred. Please try again. If the problem persists, reach out to hello@wetrocloud.com for help")]
    Unexpected,
}

impl PlaygroundError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlaygroundError::Validation(message.into())
    }
}

impl From<ClientError> for PlaygroundError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status: 401, .. } => PlaygroundError::AuthenticationRequired,
            ClientError::Status { status, message } => PlaygroundError::Server { status, message },
            ClientError::Network(_) | ClientError::Timeout => PlaygroundError::Connectivity,
            ClientError::Decode(_) | ClientError::Configuration(_) => PlaygroundError::Unexpected,
        }
    }
}
