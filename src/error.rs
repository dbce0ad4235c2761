use thiserror::Error;

pub type HarnessResult<T> = Result<T, HarnessError>;

/// Failures outside the device conversation. Device steps report a
/// [`Status`](crate::status::Status) instead.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Config file parsing error: {0}")]
    ConfigFileParsingError(#[from] toml::de::Error),
}
