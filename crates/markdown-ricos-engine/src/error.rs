/// Errors raised while turning markdown into a RICOS document.
///
/// Conversion is all-or-nothing: any of these aborts the whole call and no
/// partial document is returned.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// No usable markdown could be extracted from a request body.
    #[error("Missing markdown input: {reason}")]
    MissingInput { reason: String },

    /// A heading token carried a level outside `1..=6`.
    #[error("Invalid heading level: {0}")]
    InvalidHeadingLevel(u8),

    /// A style value was rejected (bad color, zero image size, ...).
    #[error("Invalid style value for {field}: {value}")]
    InvalidStyle { field: &'static str, value: String },

    /// An externally supplied token stream could not be decoded.
    #[error("Invalid token stream: {0}")]
    TokenStream(#[from] serde_json::Error),
}

impl ConvertError {
    pub fn missing_input(reason: impl Into<String>) -> Self {
        Self::MissingInput {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the conversion.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingInput { .. } | Self::TokenStream(_))
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
