use thiserror::Error;

#[derive(Error, Debug)]
pub enum BibError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("No metadata found for {kind} {value}")]
    NotFound { kind: String, value: String },

    #[error("Invalid {kind} identifier '{value}': {reason}")]
    InvalidIdentifier {
        kind: String,
        value: String,
        reason: String,
    },

    #[error("Metadata error: {message}")]
    MetadataError { message: String },

    #[error("Unsupported citation style: {style}")]
    UnsupportedStyle { style: String },

    #[error("Unsupported locale: {locale}")]
    UnsupportedLocale { locale: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl BibError {
    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BibError::ApiError(_) | BibError::UnexpectedStatus { .. } => {
                "Check your network connection and try again later"
            }
            BibError::NotFound { .. } | BibError::InvalidIdentifier { .. } => {
                "Double-check the identifier or add an explicit prefix such as doi: or isbn:"
            }
            BibError::SerializationError(_) | BibError::MetadataError { .. } => {
                "The service returned data that could not be used; try another identifier"
            }
            BibError::UnsupportedStyle { .. } | BibError::UnsupportedLocale { .. } => {
                "Only the apa style with the en-US locale is available"
            }
            BibError::InvalidConfigValueError { .. } => "Fix the configuration value and rerun",
        }
    }
}

pub type Result<T> = std::result::Result<T, BibError>;
