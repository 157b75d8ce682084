//! 学生可见的课程内容

use std::collections::HashMap;

use crate::errors::{EduPortalError, Result};
use crate::models::assignments::responses::{StudentAssignment, StudentAssignmentListResponse};
use crate::models::courses::{entities::Course, responses::CourseViewList};
use crate::models::exams::{entities::StudentExam, responses::StudentExamListResponse};
use crate::models::lectures::responses::LectureListResponse;
use crate::models::users::entities::User;
use crate::services::courses::view::build_course_views;
use crate::services::enrollment::can_access_course;
use crate::storage::Storage;

/// 课程存在且学生有权访问
pub(super) async fn ensure_enrolled(
    storage: &dyn Storage,
    student: &User,
    course_id: i64,
) -> Result<Course> {
    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Course not found"))?;
    if !can_access_course(storage, student, &course).await? {
        return Err(EduPortalError::authorization("You are not enrolled in this course"));
    }
    Ok(course)
}

/// (院系, 年级) 匹配的课程，新课程在前；未设置院系或年级的学生没有课程
pub async fn list_enrolled_courses(
    storage: &dyn Storage,
    student: &User,
) -> Result<CourseViewList> {
    let courses = match student.cohort() {
        Some((department_id, year)) => storage.list_courses_in_cohort(department_id, year).await?,
        None => Vec::new(),
    };
    Ok(CourseViewList {
        items: build_course_views(storage, courses).await?,
    })
}

pub async fn get_course_lectures(
    storage: &dyn Storage,
    student: &User,
    course_id: i64,
) -> Result<LectureListResponse> {
    ensure_enrolled(storage, student, course_id).await?;
    let items = storage.list_lectures_by_course(course_id).await?;
    Ok(LectureListResponse { items })
}

pub async fn get_course_exams(
    storage: &dyn Storage,
    student: &User,
    course_id: i64,
) -> Result<StudentExamListResponse> {
    ensure_enrolled(storage, student, course_id).await?;
    let exams = storage.list_exams_by_courses(&[course_id]).await?;
    let exam_ids: Vec<i64> = exams.iter().map(|exam| exam.id).collect();
    let attempted = storage.list_attempted_exam_ids(student.id, &exam_ids).await?;

    let items = exams
        .iter()
        .map(|exam| StudentExam::from_exam(exam, attempted.contains(&exam.id)))
        .collect();
    Ok(StudentExamListResponse { items })
}

pub async fn get_course_assignments(
    storage: &dyn Storage,
    student: &User,
    course_id: i64,
) -> Result<StudentAssignmentListResponse> {
    ensure_enrolled(storage, student, course_id).await?;
    let assignments = storage.list_assignments_by_courses(&[course_id]).await?;
    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let mut submissions: HashMap<i64, _> = storage
        .list_submissions_by_student(student.id, &assignment_ids)
        .await?
        .into_iter()
        .map(|submission| (submission.assignment_id, submission))
        .collect();

    let items = assignments
        .into_iter()
        .map(|assignment| StudentAssignment {
            submission: submissions.remove(&assignment.id),
            assignment,
        })
        .collect();
    Ok(StudentAssignmentListResponse { items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::testing::*;

    #[tokio::test]
    async fn test_enrolled_courses_follow_cohort() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let older = course(&storage, "OS", None, cs.id, 2).await;
        let newer = course(&storage, "DB", None, cs.id, 2).await;
        course(&storage, "Intro", None, cs.id, 1).await;

        let bob = user(&storage, "bob", UserRole::Student, Some(cs.id), Some(2)).await;
        let ids: Vec<i64> = list_enrolled_courses(storage.as_ref(), &bob)
            .await
            .unwrap()
            .items
            .iter()
            .map(|view| view.course.id)
            .collect();
        assert_eq!(ids, [newer.id, older.id]);

        let drifter = user(&storage, "drifter", UserRole::Student, None, None).await;
        assert!(list_enrolled_courses(storage.as_ref(), &drifter)
            .await
            .unwrap()
            .items
            .is_empty());
    }

    #[tokio::test]
    async fn test_course_content_requires_enrollment() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let os = course(&storage, "OS", None, cs.id, 2).await;
        let outsider = user(&storage, "out", UserRole::Student, Some(cs.id), Some(3)).await;

        assert!(matches!(
            get_course_lectures(storage.as_ref(), &outsider, os.id).await,
            Err(EduPortalError::Authorization(_))
        ));
        assert!(matches!(
            get_course_exams(storage.as_ref(), &outsider, 9999).await,
            Err(EduPortalError::NotFound(_))
        ));

        storage.add_course_students(os.id, &[outsider.id]).await.unwrap();
        assert!(get_course_assignments(storage.as_ref(), &outsider, os.id)
            .await
            .unwrap()
            .items
            .is_empty());
    }

    #[tokio::test]
    async fn test_exam_list_hides_answers_and_marks_attempted() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let os = course(&storage, "OS", None, cs.id, 2).await;
        let bob = user(&storage, "bob", UserRole::Student, Some(cs.id), Some(2)).await;
        exam(&storage, os.id, at("2026-05-01T09:00:00Z"), at("2026-05-01T10:00:00Z")).await;

        let listed = get_course_exams(storage.as_ref(), &bob, os.id).await.unwrap();
        assert_eq!(listed.items.len(), 1);
        assert!(!listed.items[0].attempted);
        let json = serde_json::to_string(&listed).unwrap();
        assert!(!json.contains("correct_answer"));
    }
}
