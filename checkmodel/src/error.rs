use thiserror::Error;

/// checkmodel 的错误类型
///
/// 字段校验失败本身不是错误，而是 [`Verdict`](crate::Verdict)；
/// 这里只描述调用方式或配置上的问题。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid regex pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid check options: {0}")]
    Config(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}")]
    InvalidLogFormat(String),

    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}

impl CheckError {
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }
}

pub type CheckResult<T> = Result<T, CheckError>;
