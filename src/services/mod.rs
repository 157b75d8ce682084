//! 业务逻辑层
//!
//! 每个领域一个 Service：HTTP 适配方法负责取出存储和当前用户，
//! 业务规则写成接收显式参数（存储、当前用户、`now`）的函数，返回 [`crate::errors::Result`]。

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod departments;
pub mod enrollment;
pub mod exams;
pub mod files;
pub mod lectures;
pub mod student;
pub mod system;
pub mod users;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use departments::DepartmentService;
pub use exams::ExamService;
pub use files::FileService;
pub use lectures::LectureService;
pub use student::StudentService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use ts_rs::TS;

use crate::errors::{EduPortalError, Result};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::upload::UploadRejection;

/// 从 app data 中取出存储
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 当前登录用户（由 RequireJWT 写入请求扩展）
pub(crate) fn current_user(request: &HttpRequest) -> Result<User> {
    RequireJWT::extract_user(request)
        .ok_or_else(|| EduPortalError::authentication("Authentication required"))
}

/// 业务错误转换为统一响应，5xx 记录错误日志
pub(crate) fn error_response(err: &EduPortalError) -> HttpResponse {
    error_response_with_code(err, ErrorCode::from(err))
}

pub(crate) fn error_response_with_code(err: &EduPortalError, code: ErrorCode) -> HttpResponse {
    let status = err.status_code();
    if status.is_server_error() {
        error!("{}", err);
        return HttpResponse::build(status).json(ApiResponse::error_empty(
            code,
            "Internal server error",
        ));
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
}

/// 成功时以 `status` 返回数据，失败时按错误类型映射
pub(crate) fn respond<T: Serialize + TS>(
    result: Result<T>,
    status: StatusCode,
    message: &str,
) -> ActixResult<HttpResponse> {
    Ok(match result {
        Ok(data) => HttpResponse::build(status).json(ApiResponse::success(data, message)),
        Err(err) => error_response(&err),
    })
}

/// 无数据的成功响应
pub(crate) fn respond_empty(result: Result<()>, message: &str) -> ActixResult<HttpResponse> {
    Ok(match result {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success_empty(message)),
        Err(err) => error_response(&err),
    })
}

/// 上传被拒绝时的响应
pub(crate) fn rejection_response(rejection: UploadRejection) -> HttpResponse {
    HttpResponse::build(rejection.status)
        .json(ApiResponse::error_empty(rejection.code, rejection.message))
}

/// 需要由存储返回的 Option 转换为 NotFound
pub(crate) fn found<T>(value: Option<T>, message: &str) -> Result<T> {
    value.ok_or_else(|| EduPortalError::not_found(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        assert_eq!(
            error_response(&EduPortalError::conflict("dup")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_response(&EduPortalError::database_operation("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_response(&EduPortalError::authorization("no")).status(),
            StatusCode::FORBIDDEN
        );
    }
}
