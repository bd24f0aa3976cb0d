use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppErr>;

#[derive(Debug, Error)]
pub enum AppErr {
    /// Startup configuration is missing or unusable. Fatal.
    #[error("configuration error: {0}")]
    Config(String),

    /// Public address lookup failed. The affected family is skipped for
    /// this run.
    #[error("address lookup failed: {0}")]
    Resolution(String),

    /// A provider call failed. The affected record stays as it was.
    #[error("provider error: {0}")]
    Provider(String),
}

impl From<reqwest::Error> for AppErr {
    fn from(value: reqwest::Error) -> Self {
        Self::Provider(value.to_string())
    }
}

impl From<serde_json::Error> for AppErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Provider(format!("[serde json]: {:?}", value))
    }
}
