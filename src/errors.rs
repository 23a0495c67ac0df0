//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! `SchoolError` 同时实现了 actix 的 `ResponseError`，作为所有接口的统一错误出口。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    ConcurrencyConflict("E007", "Concurrency Conflict"),
    Multipart("E008", "Multipart Payload Error"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
}

impl SchoolError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SchoolError::Validation(_)
            | SchoolError::Multipart(_)
            | SchoolError::Serialization(_)
            | SchoolError::DateParse(_) => ErrorCode::BadRequest,
            SchoolError::NotFound(_) => ErrorCode::NotFound,
            SchoolError::ConcurrencyConflict(_) => ErrorCode::ConcurrencyConflict,
            SchoolError::FileOperation(_) => ErrorCode::ImageStoreFailed,
            SchoolError::DatabaseConfig(_)
            | SchoolError::DatabaseConnection(_)
            | SchoolError::DatabaseOperation(_) => ErrorCode::InternalServerError,
        }
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

impl ResponseError for SchoolError {
    fn status_code(&self) -> StatusCode {
        match self {
            SchoolError::Validation(_)
            | SchoolError::Multipart(_)
            | SchoolError::Serialization(_)
            | SchoolError::DateParse(_) => StatusCode::BAD_REQUEST,
            SchoolError::NotFound(_) => StatusCode::NOT_FOUND,
            SchoolError::ConcurrencyConflict(_) => StatusCode::CONFLICT,
            SchoolError::DatabaseConfig(_)
            | SchoolError::DatabaseConnection(_)
            | SchoolError::DatabaseOperation(_)
            | SchoolError::FileOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // 5xx 不向客户端暴露内部细节
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.message().to_string()
        };
        HttpResponse::build(status).json(ApiResponse::error_empty(self.error_code(), message))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SchoolError {
    fn from(err: sea_orm::DbErr) -> Self {
        SchoolError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SchoolError {
    fn from(err: std::io::Error) -> Self {
        SchoolError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

impl From<actix_multipart::MultipartError> for SchoolError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        SchoolError::Multipart(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::database_config("test").code(), "E001");
        assert_eq!(SchoolError::validation("test").code(), "E005");
        assert_eq!(SchoolError::concurrency_conflict("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolError::file_operation("test").error_type(),
            "File Operation Error"
        );
        assert_eq!(
            SchoolError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SchoolError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::not_found("Student 7");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Student 7"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SchoolError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SchoolError::concurrency_conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SchoolError::multipart("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SchoolError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_error_conversion() {
        let err: SchoolError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("boom"));
    }
}
