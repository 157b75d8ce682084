//! 课时管理（教师，限本人任教的课程）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use super::courses::ownership::owned_course;
use super::{current_user, respond, respond_empty};
use crate::errors::{EduPortalError, Result};
use crate::models::lectures::{
    entities::Lecture,
    requests::{CreateLectureRequest, UpdateLectureRequest},
};
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::validate::validate_http_url;

pub struct LectureService {
    storage: Option<Arc<dyn Storage>>,
}

fn clean_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(EduPortalError::validation("Lecture title is required"));
    }
    Ok(title.to_string())
}

fn clean_url(url: &str) -> Result<String> {
    validate_http_url(url).map_err(EduPortalError::validation)?;
    Ok(url.trim().to_string())
}

fn check_order(order: Option<i32>) -> Result<()> {
    match order {
        Some(order) if order < 0 => Err(EduPortalError::validation(
            "Lecture order must not be negative",
        )),
        _ => Ok(()),
    }
}

/// 课时必须属于该课程
async fn lecture_in_course(
    storage: &dyn Storage,
    course_id: i64,
    lecture_id: i64,
) -> Result<Lecture> {
    storage
        .get_lecture_by_id(lecture_id)
        .await?
        .filter(|lecture| lecture.course_id == course_id)
        .ok_or_else(|| EduPortalError::not_found("Lecture not found"))
}

pub async fn add_lecture(
    storage: &dyn Storage,
    professor: &User,
    course_id: i64,
    mut request: CreateLectureRequest,
) -> Result<Lecture> {
    owned_course(storage, professor, course_id).await?;
    request.title = clean_title(&request.title)?;
    request.youtube_url = clean_url(&request.youtube_url)?;
    check_order(request.order)?;
    storage.create_lecture(course_id, request).await
}

pub async fn update_lecture(
    storage: &dyn Storage,
    professor: &User,
    course_id: i64,
    lecture_id: i64,
    mut request: UpdateLectureRequest,
) -> Result<Lecture> {
    owned_course(storage, professor, course_id).await?;
    lecture_in_course(storage, course_id, lecture_id).await?;

    if let Some(title) = &request.title {
        request.title = Some(clean_title(title)?);
    }
    if let Some(url) = &request.youtube_url {
        request.youtube_url = Some(clean_url(url)?);
    }
    check_order(request.order)?;

    storage
        .update_lecture(lecture_id, request)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Lecture not found"))
}

pub async fn delete_lecture(
    storage: &dyn Storage,
    professor: &User,
    course_id: i64,
    lecture_id: i64,
) -> Result<()> {
    owned_course(storage, professor, course_id).await?;
    lecture_in_course(storage, course_id, lecture_id).await?;
    storage.delete_lecture(lecture_id).await?;
    Ok(())
}

impl LectureService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn add_lecture(
        &self,
        course_id: i64,
        data: CreateLectureRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => add_lecture(storage.as_ref(), &professor, course_id, data).await,
            Err(err) => Err(err),
        };
        respond(result, StatusCode::CREATED, "Lecture added successfully")
    }

    pub async fn update_lecture(
        &self,
        course_id: i64,
        lecture_id: i64,
        data: UpdateLectureRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => {
                update_lecture(storage.as_ref(), &professor, course_id, lecture_id, data).await
            }
            Err(err) => Err(err),
        };
        respond(result, StatusCode::OK, "Lecture updated successfully")
    }

    pub async fn delete_lecture(
        &self,
        course_id: i64,
        lecture_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = match current_user(request) {
            Ok(professor) => {
                delete_lecture(storage.as_ref(), &professor, course_id, lecture_id).await
            }
            Err(err) => Err(err),
        };
        respond_empty(result, "Lecture deleted successfully")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::testing::*;

    fn lecture(title: &str, url: &str) -> CreateLectureRequest {
        CreateLectureRequest {
            title: title.to_string(),
            description: None,
            youtube_url: url.to_string(),
            order: None,
        }
    }

    #[tokio::test]
    async fn test_lecture_order_defaults_to_count() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let prof = user(&storage, "prof", UserRole::Professor, Some(cs.id), None).await;
        let os = course(&storage, "OS", Some(prof.id), cs.id, 1).await;

        let first = add_lecture(
            storage.as_ref(),
            &prof,
            os.id,
            lecture("Intro", "https://youtu.be/a"),
        )
        .await
        .unwrap();
        let second = add_lecture(
            storage.as_ref(),
            &prof,
            os.id,
            lecture("Threads", "https://youtu.be/b"),
        )
        .await
        .unwrap();
        assert_eq!(first.order, 0);
        assert_eq!(second.order, 1);

        let updated = update_lecture(
            storage.as_ref(),
            &prof,
            os.id,
            first.id,
            UpdateLectureRequest {
                order: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.order, 5);
        let ordered = storage.list_lectures_by_course(os.id).await.unwrap();
        assert_eq!(ordered[0].id, second.id);
    }

    #[tokio::test]
    async fn test_lecture_requires_ownership_and_valid_url() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let prof = user(&storage, "prof", UserRole::Professor, Some(cs.id), None).await;
        let intruder = user(&storage, "intruder", UserRole::Professor, Some(cs.id), None).await;
        let os = course(&storage, "OS", Some(prof.id), cs.id, 1).await;

        let err = add_lecture(
            storage.as_ref(),
            &intruder,
            os.id,
            lecture("Intro", "https://youtu.be/a"),
        )
        .await
        .unwrap_err();
        assert_eq!(err, EduPortalError::not_found("Course not found or unauthorized"));

        let err = add_lecture(storage.as_ref(), &prof, os.id, lecture("Intro", "not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, EduPortalError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_lecture_of_other_course_is_not_found() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let prof = user(&storage, "prof", UserRole::Professor, Some(cs.id), None).await;
        let os = course(&storage, "OS", Some(prof.id), cs.id, 1).await;
        let db = course(&storage, "DB", Some(prof.id), cs.id, 1).await;
        let intro = add_lecture(
            storage.as_ref(),
            &prof,
            os.id,
            lecture("Intro", "https://youtu.be/a"),
        )
        .await
        .unwrap();

        assert!(matches!(
            delete_lecture(storage.as_ref(), &prof, db.id, intro.id).await,
            Err(EduPortalError::NotFound(_))
        ));
        delete_lecture(storage.as_ref(), &prof, os.id, intro.id).await.unwrap();
        assert!(storage.get_lecture_by_id(intro.id).await.unwrap().is_none());
    }
}
