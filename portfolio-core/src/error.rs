use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("remote service is not configured")]
    Unconfigured,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("remote reported an error: {0}")]
    Remote(String),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response is missing `{0}`")]
    MissingData(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("All fields are required")]
    MissingField,
    #[error("Invalid email format")]
    InvalidEmail,
}
