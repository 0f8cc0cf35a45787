//! mdmail-errors - 统一错误处理
//!
//! 校验错误在任何 I/O 之前返回，渲染与传输错误原样向调用方传播

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Mailer is closed")]
    Closed,

    #[error("Mailer has been destroyed")]
    Destroyed,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 稳定的错误码，用于日志字段和 metrics 标签
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Render(_) => "render",
            Self::Transport(_) => "transport",
            Self::Closed => "closed",
            Self::Destroyed => "destroyed",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// 是否为生命周期错误（关闭或销毁后调用）
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Closed | Self::Destroyed)
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
