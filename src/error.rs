use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostkitError {
    #[error("读取文件失败 {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("写入文件失败 {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON 解析错误 {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("无效的 Collection: {0}")]
    InvalidCollection(String),

    #[error("模板错误: {0}")]
    TemplateError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl PostkitError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PostkitError::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PostkitError::WriteFile {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        PostkitError::InvalidJson {
            path: path.into(),
            source,
        }
    }
}

/// Result type for postkit crate
pub type Result<T> = std::result::Result<T, PostkitError>;
