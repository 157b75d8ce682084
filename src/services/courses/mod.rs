pub mod manage;
pub mod ownership;
pub mod view;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use super::{current_user, respond, respond_empty};
use crate::models::PaginationQuery;
use crate::models::courses::requests::CourseRequest;
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 课程列表（管理员）
    pub async fn list_courses(
        &self,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            manage::list_courses(storage.as_ref(), query).await,
            StatusCode::OK,
            "Course list retrieved successfully",
        )
    }

    pub async fn get_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            manage::get_course(storage.as_ref(), course_id).await,
            StatusCode::OK,
            "Course retrieved successfully",
        )
    }

    pub async fn create_course(
        &self,
        data: CourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            manage::create_course(storage.as_ref(), data).await,
            StatusCode::CREATED,
            "Course created successfully",
        )
    }

    pub async fn update_course(
        &self,
        course_id: i64,
        data: CourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            manage::update_course(storage.as_ref(), course_id, data).await,
            StatusCode::OK,
            "Course updated successfully",
        )
    }

    pub async fn delete_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond_empty(
            manage::delete_course(storage.as_ref(), course_id).await,
            "Course deleted successfully",
        )
    }

    // 教师自己的课程
    pub async fn list_own_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => view::list_own_courses(storage.as_ref(), &professor).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Courses retrieved successfully")
    }
}
