use thiserror::Error;

/// Failures that mean the probe itself is broken, not the probed service.
/// Reported with [`crate::verdict::SETUP_FAILURE_EXIT_CODE`].
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to load markup grammar: {0}")]
    Grammar(String),

    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
