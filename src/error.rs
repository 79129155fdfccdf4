//! Tick 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。

use std::io;
use thiserror::Error;

/// Tick 错误类型
#[derive(Debug, Error)]
pub enum TickError {
    /// I/O 错误（快照文件读写、目录创建等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON 编解码错误（快照内容损坏或无法序列化）
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 无效数据（例如空的任务文本）
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Tick Result 类型别名
pub type Result<T> = std::result::Result<T, TickError>;

impl TickError {
    /// 创建 InvalidData 错误
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TickError::invalid_data("task name is empty");
        assert_eq!(err.to_string(), "Invalid data: task name is empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TickError = io_err.into();
        assert!(matches!(err, TickError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: TickError = json_err.into();
        assert!(matches!(err, TickError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
