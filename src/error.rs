use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Setup error: {0}")]
    Setup(String),

    #[error("'{command}' failed: {status}")]
    Subprocess { command: String, status: ExitStatus },
}

impl Error {
    pub fn setup(msg: impl Into<String>) -> Self {
        Error::Setup(msg.into())
    }
}
