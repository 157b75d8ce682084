//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。

use std::fmt;

use actix_web::http::StatusCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - status_code() 方法 - 返回对应的 HTTP 状态码
/// - 便捷构造函数
macro_rules! define_eduportal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum EduPortalError {
            $($variant(String),)*
        }

        impl EduPortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduPortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduPortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduPortalError::$variant(msg) => msg,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status_code(&self) -> StatusCode {
                match self {
                    $(EduPortalError::$variant(_) => StatusCode::$status,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EduPortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduPortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_eduportal_errors! {
    DatabaseConfig("E001", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E002", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E003", "Database Operation Error", INTERNAL_SERVER_ERROR),
    FileOperation("E004", "File Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E005", "Validation Error", BAD_REQUEST),
    NotFound("E006", "Resource Not Found", NOT_FOUND),
    Serialization("E007", "Serialization Error", INTERNAL_SERVER_ERROR),
    DateParse("E008", "Date Parse Error", INTERNAL_SERVER_ERROR),
    Authentication("E009", "Authentication Error", UNAUTHORIZED),
    Authorization("E010", "Authorization Error", FORBIDDEN),
    Conflict("E011", "Conflict Error", CONFLICT),
    PasswordHash("E012", "Password Hash Error", INTERNAL_SERVER_ERROR),
    Token("E013", "Token Error", INTERNAL_SERVER_ERROR),
}

impl EduPortalError {
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

    /// 是否属于服务端内部错误
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl fmt::Display for EduPortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduPortalError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EduPortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一索引冲突视为业务冲突，而不是数据库故障
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return EduPortalError::Conflict(detail);
        }
        EduPortalError::DatabaseOperation(err.to_string())
    }
}

impl<E> From<sea_orm::TransactionError<E>> for EduPortalError
where
    E: Into<EduPortalError> + std::error::Error,
{
    fn from(err: sea_orm::TransactionError<E>) -> Self {
        match err {
            sea_orm::TransactionError::Connection(e) => e.into(),
            sea_orm::TransactionError::Transaction(e) => e.into(),
        }
    }
}

impl From<std::io::Error> for EduPortalError {
    fn from(err: std::io::Error) -> Self {
        EduPortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EduPortalError {
    fn from(err: serde_json::Error) -> Self {
        EduPortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EduPortalError {
    fn from(err: chrono::ParseError) -> Self {
        EduPortalError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduPortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduPortalError::database_config("test").code(), "E001");
        assert_eq!(EduPortalError::validation("test").code(), "E005");
        assert_eq!(EduPortalError::authentication("test").code(), "E009");
        assert_eq!(EduPortalError::conflict("test").code(), "E011");
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            EduPortalError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            EduPortalError::authorization("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            EduPortalError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EduPortalError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EduPortalError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert!(EduPortalError::database_operation("x").is_internal());
        assert!(!EduPortalError::validation("x").is_internal());
    }

    #[test]
    fn test_error_message() {
        let err = EduPortalError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
        assert_eq!(err.error_type(), "Validation Error");
    }

    #[test]
    fn test_db_err_maps_to_database_operation() {
        let err: EduPortalError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E003");
    }

    #[test]
    fn test_format_simple() {
        let err = EduPortalError::not_found("Course not found");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Course not found"));
    }
}
