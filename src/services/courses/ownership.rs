//! 教师的课程归属校验

use crate::errors::{EduPortalError, Result};
use crate::models::courses::entities::Course;
use crate::models::users::entities::User;
use crate::storage::Storage;

const NOT_FOUND_OR_UNAUTHORIZED: &str = "Course not found or unauthorized";

/// 按课程 ID 寻址的操作：课程不存在或不属于该教师一律返回 NotFound
pub async fn owned_course(
    storage: &dyn Storage,
    professor: &User,
    course_id: i64,
) -> Result<Course> {
    storage
        .get_course_by_id(course_id)
        .await?
        .filter(|course| course.is_taught_by(professor.id))
        .ok_or_else(|| EduPortalError::not_found(NOT_FOUND_OR_UNAUTHORIZED))
}

/// 按考试、作业等子资源寻址的操作：资源已找到，课程不属于该教师时返回 Forbidden
pub async fn ensure_course_owner(
    storage: &dyn Storage,
    professor: &User,
    course_id: i64,
) -> Result<Course> {
    match storage.get_course_by_id(course_id).await? {
        Some(course) if course.is_taught_by(professor.id) => Ok(course),
        _ => Err(EduPortalError::authorization(
            "You are not the professor of this course",
        )),
    }
}
