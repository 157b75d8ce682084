pub mod assignments;
pub mod courses;
pub mod exams;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use chrono::Utc;
use std::sync::Arc;

use super::{current_user, error_response, rejection_response, respond};
use crate::models::attempts::requests::SubmitExamRequest;
use crate::storage::Storage;
use crate::utils::upload::read_multipart;

const SUBMISSION_FIELD: &str = "file";

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(student) => courses::list_enrolled_courses(storage.as_ref(), &student).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Courses retrieved successfully")
    }

    pub async fn get_course_lectures(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(student) => {
                courses::get_course_lectures(storage.as_ref(), &student, course_id).await
            }
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Lectures retrieved successfully")
    }

    pub async fn get_course_exams(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(student) => courses::get_course_exams(storage.as_ref(), &student, course_id).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Exams retrieved successfully")
    }

    pub async fn get_course_assignments(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(student) => {
                courses::get_course_assignments(storage.as_ref(), &student, course_id).await
            }
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Assignments retrieved successfully")
    }

    pub async fn submit_exam(
        &self,
        exam_id: i64,
        data: SubmitExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(student) => {
                exams::submit_exam_attempt(storage.as_ref(), &student, exam_id, data, Utc::now())
                    .await
            }
            Err(err) => Err(err),
        };
        respond(result, StatusCode::CREATED, "Exam submitted successfully")
    }

    pub async fn get_exam_attempt(
        &self,
        exam_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(student) => exams::get_exam_attempt(storage.as_ref(), &student, exam_id).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Exam attempt retrieved successfully")
    }

    pub async fn submit_assignment(
        &self,
        assignment_id: i64,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let student = match current_user(request) {
            Ok(user) => user,
            Err(err) => return Ok(error_response(&err)),
        };
        // 文件类型使用配置中的白名单
        let data = match read_multipart(payload, SUBMISSION_FIELD, None).await {
            Ok(data) => data,
            Err(rejection) => return Ok(rejection_response(rejection)),
        };

        let storage = self.get_storage(request);
        let result = assignments::submit_assignment(
            storage.as_ref(),
            &student,
            assignment_id,
            data.file.as_ref(),
            Utc::now(),
        )
        .await;
        if result.is_err()
            && let Some(file) = &data.file
        {
            file.discard();
        }
        respond(result, StatusCode::CREATED, "Assignment submitted successfully")
    }

    pub async fn get_own_submission(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(student) => {
                assignments::get_own_submission(storage.as_ref(), &student, assignment_id).await
            }
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Submission retrieved successfully")
    }
}
