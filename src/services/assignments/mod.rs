pub mod form;
pub mod manage;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use chrono::Utc;
use std::sync::Arc;

use super::{current_user, error_response, rejection_response, respond, respond_empty};
use crate::errors::Result;
use crate::models::assignments::{entities::Assignment, requests::AssignmentForm};
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::upload::{MultipartData, read_multipart};

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    /// 读取表单与可选的 PDF 附件后交给 `action`；业务失败时删除已落盘的附件
    async fn with_form<F, Fut>(
        &self,
        payload: Multipart,
        request: &HttpRequest,
        status: StatusCode,
        message: &str,
        action: F,
    ) -> ActixResult<HttpResponse>
    where
        F: FnOnce(Arc<dyn Storage>, User, MultipartData) -> Fut,
        Fut: std::future::Future<Output = Result<Assignment>>,
    {
        let professor = match current_user(request) {
            Ok(user) => user,
            Err(err) => return Ok(error_response(&err)),
        };
        let data = match read_multipart(payload, form::PDF_FIELD, Some(form::PDF_TYPES)).await {
            Ok(data) => data,
            Err(rejection) => return Ok(rejection_response(rejection)),
        };

        let uploaded = data.file.clone();
        let result = action(self.get_storage(request), professor, data).await;
        if result.is_err()
            && let Some(file) = uploaded
        {
            file.discard();
        }
        respond(result, status, message)
    }

    pub async fn create_assignment(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        self.with_form(
            payload,
            request,
            StatusCode::CREATED,
            "Assignment created successfully",
            |storage, professor, mut data| async move {
                let fields = form::parse_form(&AssignmentForm::from_multipart(&mut data))?;
                let pdf = data.file.as_ref().map(|file| form::attached(file, Utc::now()));
                manage::create_assignment(storage.as_ref(), &professor, fields, pdf).await
            },
        )
        .await
    }

    pub async fn update_assignment(
        &self,
        assignment_id: i64,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        self.with_form(
            payload,
            request,
            StatusCode::OK,
            "Assignment updated successfully",
            |storage, professor, mut data| async move {
                let fields = form::parse_form(&AssignmentForm::from_multipart(&mut data))?;
                let pdf = data.file.as_ref().map(|file| form::attached(file, Utc::now()));
                manage::update_assignment(storage.as_ref(), &professor, assignment_id, fields, pdf)
                    .await
            },
        )
        .await
    }

    pub async fn delete_assignment(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => {
                manage::delete_assignment(storage.as_ref(), &professor, assignment_id).await
            }
            Err(err) => Err(err),
        };
        respond_empty(result, "Assignment deleted successfully")
    }

    pub async fn list_assignments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => manage::list_assignments(storage.as_ref(), &professor).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Assignments retrieved successfully")
    }

    pub async fn list_submissions(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => {
                manage::list_submissions(storage.as_ref(), &professor, assignment_id).await
            }
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Submissions retrieved successfully")
    }

    pub async fn grade_submission(
        &self,
        submission_id: i64,
        data: GradeSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => {
                manage::grade_submission(storage.as_ref(), &professor, submission_id, data).await
            }
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Submission graded successfully")
    }
}
