pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::chat::AskResponse;

pub use self::http::HttpAskClient;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Input is empty after trimming")]
    EmptyInput,
    #[error("Server error: {status}")]
    ServerError { status: u16 },
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// One question, one answer. Implementations must not retry.
#[async_trait]
pub trait AskTransport: Send + Sync {
    async fn ask(&self, message: &str) -> Result<AskResponse, ChatError>;
}
