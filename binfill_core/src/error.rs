use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum MonitorError {
    #[error("sensor error: {0}")]
    Sensor(String),
    #[error("display error: {0}")]
    Display(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("publish error: {0}")]
    Publish(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing sensor port")]
    MissingPort,
    #[error("missing bin id")]
    MissingBinId,
    #[error("invalid config: {0}")]
    InvalidTiming(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
