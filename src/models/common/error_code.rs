use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::EduPortalError;

// 业务错误码，随 ApiResponse 一起返回给前端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证相关
    AuthFailed = 2000,
    CanNotDeleteCurrentUser = 2002,

    // 文件相关
    FileUploadFailed = 7000,
    FileTypeNotAllowed = 7001,
    FileSizeExceeded = 7002,
    FileNotFound = 7003,
    MultifileUploadNotAllowed = 7004,
}

impl From<&EduPortalError> for ErrorCode {
    fn from(err: &EduPortalError) -> Self {
        match err {
            EduPortalError::Validation(_) => ErrorCode::BadRequest,
            EduPortalError::Authentication(_) => ErrorCode::Unauthorized,
            EduPortalError::Authorization(_) => ErrorCode::Forbidden,
            EduPortalError::NotFound(_) => ErrorCode::NotFound,
            EduPortalError::Conflict(_) => ErrorCode::Conflict,
            _ => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            ErrorCode::from(&EduPortalError::validation("x")),
            ErrorCode::BadRequest
        );
        assert_eq!(
            ErrorCode::from(&EduPortalError::conflict("x")),
            ErrorCode::Conflict
        );
        assert_eq!(
            ErrorCode::from(&EduPortalError::serialization("x")),
            ErrorCode::InternalServerError
        );
        assert_eq!(ErrorCode::Forbidden as i32, 1003);
    }
}
