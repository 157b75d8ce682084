pub mod login;
pub mod profile;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use super::{current_user, error_response, error_response_with_code, respond};
use crate::errors::EduPortalError;
use crate::models::ErrorCode;
use crate::models::auth::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match login::login(storage.as_ref(), login_request).await {
            Ok(response) => respond(Ok(response), StatusCode::OK, "Login successful"),
            Err(err @ EduPortalError::Authentication(_)) => {
                Ok(error_response_with_code(&err, ErrorCode::AuthFailed))
            }
            Err(err) => Ok(error_response(&err)),
        }
    }

    // 用户注册
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            register::register(storage.as_ref(), register_request).await,
            StatusCode::CREATED,
            "Registration successful",
        )
    }

    // 获取当前用户资料
    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        respond(current_user(request), StatusCode::OK, "Profile retrieved successfully")
    }

    // 更新用户资料
    pub async fn update_profile(
        &self,
        update_request: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(user) => profile::update_profile(storage.as_ref(), &user, update_request).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Profile updated successfully")
    }
}
