//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 提示词组装错误类型
#[derive(Debug, Error)]
pub enum Error {
    // ==================== 配置错误 ====================
    #[error("failed to load templates from {path}: {reason}")]
    ConfigLoad { path: String, reason: String },

    // ==================== 输入错误 ====================
    #[error("please provide a custom subject description")]
    EmptySubject,

    #[error("invalid input, {0}")]
    InvalidInput(String),

    #[error("unknown subject type: {0}")]
    UnknownSubjectType(String),

    // ==================== 模板错误 ====================
    #[error("no template for preset '{key}' in {category}, available keys: [{}]", available.join(", "))]
    TemplateNotFound {
        category: String,
        key: String,
        available: Vec<String>,
    },

    #[error("assembly failed: {0}")]
    Assembly(String),

    // ==================== 其他错误 ====================
    #[error("regex error, {0}")]
    Regex(#[from] regex::Error),
}
