use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A filter's mana range must satisfy `min <= max`.
    #[error("mana range inverted: min {min} > max {max}")]
    InvertedManaRange { min: u32, max: u32 },

    /// Color codes are single letters out of WUBRG.
    #[error("unknown color code '{0}'")]
    UnknownColor(char),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Non-2xx answer from an external service.
    #[error("{url} answered with status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// A card search matched nothing, even after the commander-only fallback.
    #[error("no cards matched the search '{query}'")]
    EmptyResults { query: String },

    /// Popped from an empty prefetch queue.
    #[error("the prefetch queue is empty")]
    QueueEmpty,

    /// An operation on the current pick was requested before anything was drawn.
    #[error("no commander drawn yet, nothing to {action}")]
    NoCurrent { action: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
