//! 错误处理模块

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use pages_orchestrator_core::CoreError;
use serde::Serialize;

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing Pages Token")]
    MissingPagesToken,

    #[error("Invalid API Route")]
    InvalidRoute,

    #[error("请求参数错误: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Provider(String),

    #[error("存储错误: {0}")]
    Storage(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// API 响应包装
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// 不带数据的成功响应：`{"success":true}`
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// 不带错误信息的失败响应：`{"success":false}`
    pub fn failed() -> Self {
        Self {
            success: false,
            data: None,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingPagesToken => StatusCode::UNAUTHORIZED,
            Self::InvalidRoute => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Provider(_) => StatusCode::BAD_GATEWAY,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(self.to_string()))
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_expected() {
            tracing::warn!("{err}");
        } else {
            tracing::error!("{err}");
        }
        match err {
            CoreError::ValidationError(msg) => Self::BadRequest(msg),
            CoreError::MissingPagesToken => Self::MissingPagesToken,
            CoreError::StorageError(msg) => Self::Storage(msg),
            CoreError::SerializationError(msg) => Self::Internal(msg),
            CoreError::Provider(e) => Self::Provider(e.to_string()),
        }
    }
}
