// src/message.rs
use serde::{Deserialize, Serialize};

/// Body sent to the chatbot endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Reply from the chatbot endpoint. Extra fields (the server also sends a
/// `date`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
