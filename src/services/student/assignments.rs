//! 学生提交作业

use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::{EduPortalError, Result};
use crate::models::submissions::entities::AssignmentSubmission;
use crate::models::users::entities::User;
use crate::services::enrollment::can_access_course;
use crate::storage::Storage;
use crate::utils::upload::StoredFile;

/// 提交作业文件；截止时间当刻仍可提交，每个学生每份作业只能提交一次
pub async fn submit_assignment(
    storage: &dyn Storage,
    student: &User,
    assignment_id: i64,
    file: Option<&StoredFile>,
    now: DateTime<Utc>,
) -> Result<AssignmentSubmission> {
    let file = file.ok_or_else(|| EduPortalError::validation("A submission file is required"))?;

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Assignment not found"))?;
    let course = storage
        .get_course_by_id(assignment.course_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Course not found"))?;
    if !can_access_course(storage, student, &course).await? {
        return Err(EduPortalError::authorization("You are not enrolled in this course"));
    }

    if !assignment.accepts_submission_at(now) {
        return Err(EduPortalError::validation("The assignment deadline has passed"));
    }

    if storage
        .get_submission_by_assignment_and_student(assignment_id, student.id)
        .await?
        .is_some()
    {
        return Err(EduPortalError::conflict("You have already submitted this assignment"));
    }

    let submission = storage
        .create_submission(assignment_id, student.id, &file.public_path, now)
        .await?;
    info!(
        "Student {} submitted assignment {} ({} bytes)",
        student.id, assignment_id, file.size
    );
    Ok(submission)
}

pub async fn get_own_submission(
    storage: &dyn Storage,
    student: &User,
    assignment_id: i64,
) -> Result<AssignmentSubmission> {
    storage
        .get_submission_by_assignment_and_student(assignment_id, student.id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Submission not found"))
}
