/// Serialized request/response envelope for embedding the converter behind
/// a JSON boundary (an HTTP handler, a message queue worker, an editor RPC).
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// A conversion request: the raw Markdown to convert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub markdown: String,
}

impl ConvertRequest {
    pub fn new(markdown: impl Into<String>) -> Self {
        ConvertRequest {
            markdown: markdown.into(),
        }
    }
}

/// A conversion response. Exactly one of `html` and `error` is present,
/// keyed off `success`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConvertResponse {
    pub fn success(html: impl Into<String>) -> Self {
        ConvertResponse {
            success: true,
            html: Some(html.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ConvertResponse {
            success: false,
            html: None,
            error: Some(error.into()),
        }
    }

    pub fn from_result(result: Result<String, ConvertError>) -> Self {
        match result {
            Ok(html) => Self::success(html),
            Err(error) => Self::failure(error.to_string()),
        }
    }
}
