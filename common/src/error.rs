//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid pattern '{pattern}' in layer '{layer}': {reason}")]
    Pattern {
        layer: String,
        pattern: String,
        reason: String,
    },

    #[error("Catalogue error: {0}")]
    Catalogue(String),

    #[error("Invalid color '{0}': expected #RRGGBB or #RRGGBBAA")]
    Color(String),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
