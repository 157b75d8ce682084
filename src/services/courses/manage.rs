use tracing::warn;

use super::view::{build_course_view, build_course_views};
use crate::errors::{EduPortalError, Result};
use crate::models::PaginationQuery;
use crate::models::courses::requests::CourseRequest;
use crate::models::courses::responses::{CourseListResponse, CourseView};
use crate::models::users::entities::UserRole;
use crate::services::{enrollment, found};
use crate::storage::Storage;

/// 清理并校验课程字段：院系必须存在，教师若指定必须是教师角色
async fn validated(storage: &dyn Storage, mut request: CourseRequest) -> Result<CourseRequest> {
    request.name = request.name.trim().to_string();
    if request.name.is_empty() {
        return Err(EduPortalError::validation("Course name is required"));
    }
    if request.year < 1 {
        return Err(EduPortalError::validation("Course year must be a positive integer"));
    }
    if storage.get_department_by_id(request.department_id).await?.is_none() {
        return Err(EduPortalError::not_found("Department not found"));
    }
    if let Some(professor_id) = request.professor_id {
        let is_professor = storage
            .get_user_by_id(professor_id)
            .await?
            .is_some_and(|user| user.role == UserRole::Professor);
        if !is_professor {
            return Err(EduPortalError::validation(
                "professor_id must reference a professor",
            ));
        }
    }
    Ok(request)
}

pub async fn list_courses(
    storage: &dyn Storage,
    query: PaginationQuery,
) -> Result<CourseListResponse> {
    let (courses, pagination) = storage.list_courses_with_pagination(query).await?;
    Ok(CourseListResponse {
        items: build_course_views(storage, courses).await?,
        pagination,
    })
}

pub async fn get_course(storage: &dyn Storage, course_id: i64) -> Result<CourseView> {
    let course = found(storage.get_course_by_id(course_id).await?, "Course not found")?;
    build_course_view(storage, course).await
}

/// 创建课程并加入所有匹配的学生
pub async fn create_course(storage: &dyn Storage, request: CourseRequest) -> Result<CourseView> {
    let request = validated(storage, request).await?;
    let course = storage.create_course(request).await?;
    enrollment::enroll_cohort(storage, &course).await?;
    build_course_view(storage, course).await
}

/// 更新课程；新的 (院系, 年级) 匹配的学生同样自动加入，已有名单不移除
pub async fn update_course(
    storage: &dyn Storage,
    course_id: i64,
    request: CourseRequest,
) -> Result<CourseView> {
    found(storage.get_course_by_id(course_id).await?, "Course not found")?;
    let request = validated(storage, request).await?;
    let course = found(storage.update_course(course_id, request).await?, "Course not found")?;
    enrollment::enroll_cohort(storage, &course).await?;
    build_course_view(storage, course).await
}

pub async fn delete_course(storage: &dyn Storage, course_id: i64) -> Result<()> {
    if !storage.delete_course_cascade(course_id).await? {
        return Err(EduPortalError::not_found("Course not found"));
    }
    warn!("Course {} deleted", course_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::*;

    fn request(department_id: i64, professor_id: Option<i64>, year: i32) -> CourseRequest {
        CourseRequest {
            name: "Compilers".to_string(),
            professor_id,
            department_id,
            year,
        }
    }

    #[tokio::test]
    async fn test_create_course_enrolls_matching_students() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let prof = user(&storage, "prof", UserRole::Professor, Some(cs.id), None).await;
        let s1 = user(&storage, "s1", UserRole::Student, Some(cs.id), Some(3)).await;
        user(&storage, "s2", UserRole::Student, Some(cs.id), Some(2)).await;

        let view = create_course(storage.as_ref(), request(cs.id, Some(prof.id), 3))
            .await
            .unwrap();
        assert_eq!(view.students.len(), 1);
        assert_eq!(view.students[0].id, s1.id);
    }

    #[tokio::test]
    async fn test_course_validation() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let student = user(&storage, "s1", UserRole::Student, Some(cs.id), Some(3)).await;

        assert!(matches!(
            create_course(storage.as_ref(), request(cs.id + 10, None, 1)).await,
            Err(EduPortalError::NotFound(_))
        ));
        assert!(matches!(
            create_course(storage.as_ref(), request(cs.id, Some(student.id), 1)).await,
            Err(EduPortalError::Validation(_))
        ));
        assert!(matches!(
            create_course(storage.as_ref(), request(cs.id, None, 0)).await,
            Err(EduPortalError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_course_enrolls_new_cohort_and_keeps_old() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let first = user(&storage, "s1", UserRole::Student, Some(cs.id), Some(1)).await;
        let second = user(&storage, "s2", UserRole::Student, Some(cs.id), Some(2)).await;

        let view = create_course(storage.as_ref(), request(cs.id, None, 1)).await.unwrap();
        let updated = update_course(storage.as_ref(), view.course.id, request(cs.id, None, 2))
            .await
            .unwrap();
        let mut ids: Vec<i64> = updated.students.iter().map(|s| s.id).collect();
        ids.sort();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
