//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("No request transport available (tried: {0})")]
    TransportUnavailable(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
