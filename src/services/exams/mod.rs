pub mod grading;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use super::{current_user, respond, respond_empty};
use crate::models::attempts::requests::GradeAttemptRequest;
use crate::models::exams::requests::{CreateExamRequest, UpdateExamRequest};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn create_exam(
        &self,
        data: CreateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => manage::create_exam(storage.as_ref(), &professor, data).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::CREATED, "Exam created successfully")
    }

    pub async fn list_exams(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => manage::list_exams(storage.as_ref(), &professor).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Exams retrieved successfully")
    }

    pub async fn get_exam(&self, exam_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => manage::get_exam(storage.as_ref(), &professor, exam_id).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Exam retrieved successfully")
    }

    pub async fn update_exam(
        &self,
        exam_id: i64,
        data: UpdateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => manage::update_exam(storage.as_ref(), &professor, exam_id, data).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Exam updated successfully")
    }

    pub async fn delete_exam(
        &self,
        exam_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => manage::delete_exam(storage.as_ref(), &professor, exam_id).await,
            Err(err) => Err(err),
        };
        respond_empty(result, "Exam deleted successfully")
    }

    pub async fn get_exam_grades(
        &self,
        exam_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => grading::get_exam_grades(storage.as_ref(), &professor, exam_id).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Exam grades retrieved successfully")
    }

    pub async fn get_attempt_detail(
        &self,
        attempt_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => {
                grading::get_attempt_detail(storage.as_ref(), &professor, attempt_id).await
            }
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Exam attempt retrieved successfully")
    }

    pub async fn grade_exam_attempt(
        &self,
        attempt_id: i64,
        data: GradeAttemptRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => {
                grading::grade_exam_attempt(storage.as_ref(), &professor, attempt_id, data).await
            }
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Exam attempt graded successfully")
    }
}
