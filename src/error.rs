/// Error handling for the conversion engine.
///
/// Malformed Markdown is never an error: the parser always degrades to
/// best-effort output so a publishing workflow cannot block on a
/// partially-wrong document. The only fatal condition is input that is not
/// valid UTF-8 text.
use thiserror::Error;

/// Main error type for the conversion engine.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input bytes were not valid UTF-8 text.
    #[error("input is not valid UTF-8: {source}")]
    InputEncoding {
        #[from]
        source: std::str::Utf8Error,
    },

    /// HTML emission failed. Not reachable from malformed Markdown; exists
    /// for defensive reporting from the rendering layer.
    #[error("render error: {message}")]
    Render { message: String },
}

/// Convenience alias for Results in the conversion engine.
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Creates a new render error.
    pub fn render_error(message: impl Into<String>) -> Self {
        ConvertError::Render {
            message: message.into(),
        }
    }

    /// Returns true if the caller could retry with repaired input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ConvertError::InputEncoding { .. } => true,
            ConvertError::Render { .. } => false,
        }
    }
}
