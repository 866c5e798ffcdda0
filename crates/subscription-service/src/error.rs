//! 订阅服务错误类型
//!
//! 定义服务层的业务错误和系统错误

use thiserror::Error;
use uuid::Uuid;

/// 订阅服务错误类型
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("订阅不存在: {0}")]
    NotFound(Uuid),

    #[error("参数校验失败: {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
}

/// 订阅服务 Result 类型别名
pub type Result<T> = std::result::Result<T, SubscriptionError>;

impl SubscriptionError {
    /// 构造参数校验错误
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Database(_))
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "SUBSCRIPTION_NOT_FOUND",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
