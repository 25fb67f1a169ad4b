// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Errors
/// 저장소 구현체가 반환하는 오류
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate auction id: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid auction record: {0}")]
    InvalidRecord(String),
}

/// 호출자에게 노출되는 오류
/// 내부 저장소 오류 내용은 로그로만 남기고 메시지만 전달한다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StorageError {
    pub message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// endregion: --- Errors
