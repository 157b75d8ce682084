pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use super::{current_user, error_response, error_response_with_code, respond, respond_empty};
use crate::errors::EduPortalError;
use crate::models::ErrorCode;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListQuery};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            list::list_users(storage.as_ref(), query).await,
            StatusCode::OK,
            "User list retrieved successfully",
        )
    }

    // 创建用户
    pub async fn create_user(
        &self,
        user_data: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            create::create_user(storage.as_ref(), user_data).await,
            StatusCode::CREATED,
            "User created successfully",
        )
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            get::get_user(storage.as_ref(), user_id).await,
            StatusCode::OK,
            "User information retrieved successfully",
        )
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            update::update_user(storage.as_ref(), user_id, update_data).await,
            StatusCode::OK,
            "User updated successfully",
        )
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let admin = match current_user(request) {
            Ok(user) => user,
            Err(err) => return Ok(error_response(&err)),
        };
        match delete::delete_user(storage.as_ref(), &admin, user_id).await {
            Err(err @ EduPortalError::Validation(_)) => Ok(error_response_with_code(
                &err,
                ErrorCode::CanNotDeleteCurrentUser,
            )),
            result => respond_empty(result, "User deleted successfully"),
        }
    }
}
