use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImStegError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Submission error: {0}")]
    Submission(#[from] imsteg_common::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImStegError>;
