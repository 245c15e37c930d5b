use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    // Request validation errors
    #[error("{message}")]
    InvalidRequest { message: String },

    #[error("GitHub service not configured")]
    NotConfigured,

    // GitHub contents API errors
    #[error("GitHub Error {status}: {body}")]
    GitHubApi { status: u16, body: String },

    #[error("GitHub request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Failed to decode waitlist content: {source}")]
    ContentDecode {
        #[source]
        source: base64::DecodeError,
    },

    #[error("Failed to parse waitlist JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    // Template errors
    #[error("Failed to load template '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ServiceError>;
