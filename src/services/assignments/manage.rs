//! 作业管理与评分（教师）

use std::collections::HashMap;

use crate::errors::{EduPortalError, Result};
use crate::models::assignments::{
    entities::{Assignment, AttachedFile},
    requests::{AssignmentFields, AssignmentRecord},
    responses::AssignmentListResponse,
};
use crate::models::submissions::{
    entities::AssignmentSubmission,
    requests::GradeSubmissionRequest,
    responses::{SubmissionListResponse, SubmissionView},
};
use crate::models::users::entities::User;
use crate::services::courses::ownership::{ensure_course_owner, owned_course};
use crate::storage::Storage;

async fn owned_assignment(
    storage: &dyn Storage,
    professor: &User,
    assignment_id: i64,
) -> Result<Assignment> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Assignment not found"))?;
    ensure_course_owner(storage, professor, assignment.course_id).await?;
    Ok(assignment)
}

pub async fn create_assignment(
    storage: &dyn Storage,
    professor: &User,
    fields: AssignmentFields,
    pdf: Option<AttachedFile>,
) -> Result<Assignment> {
    owned_course(storage, professor, fields.course_id).await?;
    storage
        .create_assignment(AssignmentRecord { fields, pdf })
        .await
}

/// 更新作业会清空它的全部提交；`pdf` 为 None 时保留原附件
pub async fn update_assignment(
    storage: &dyn Storage,
    professor: &User,
    assignment_id: i64,
    fields: AssignmentFields,
    pdf: Option<AttachedFile>,
) -> Result<Assignment> {
    let assignment = owned_assignment(storage, professor, assignment_id).await?;
    if fields.course_id != assignment.course_id {
        owned_course(storage, professor, fields.course_id).await?;
    }
    storage
        .update_assignment_cascade(assignment_id, AssignmentRecord { fields, pdf })
        .await?
        .ok_or_else(|| EduPortalError::not_found("Assignment not found"))
}

pub async fn delete_assignment(
    storage: &dyn Storage,
    professor: &User,
    assignment_id: i64,
) -> Result<()> {
    owned_assignment(storage, professor, assignment_id).await?;
    storage.delete_assignment_cascade(assignment_id).await?;
    Ok(())
}

pub async fn list_assignments(
    storage: &dyn Storage,
    professor: &User,
) -> Result<AssignmentListResponse> {
    let course_ids: Vec<i64> = storage
        .list_courses_by_professor(professor.id)
        .await?
        .iter()
        .map(|course| course.id)
        .collect();
    let items = storage.list_assignments_by_courses(&course_ids).await?;
    Ok(AssignmentListResponse { items })
}

pub async fn list_submissions(
    storage: &dyn Storage,
    professor: &User,
    assignment_id: i64,
) -> Result<SubmissionListResponse> {
    owned_assignment(storage, professor, assignment_id).await?;
    let submissions = storage.list_submissions_by_assignment(assignment_id).await?;

    let student_ids: Vec<i64> = submissions.iter().map(|s| s.student_id).collect();
    let students: HashMap<i64, User> = storage
        .get_users_by_ids(&student_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    let items = submissions
        .into_iter()
        .map(|submission| {
            let student = students.get(&submission.student_id);
            SubmissionView {
                student_name: student.map(User::full_name),
                student_username: student.map(|student| student.username.clone()),
                submission,
            }
        })
        .collect();

    Ok(SubmissionListResponse {
        assignment_id,
        items,
    })
}

/// 分数必须给出，且在 0 到作业满分之间（含两端）
fn check_score(score: Option<f64>, max_score: f64) -> Result<f64> {
    match score {
        Some(score) if score.is_finite() && (0.0..=max_score).contains(&score) => Ok(score),
        _ => Err(EduPortalError::validation(format!(
            "Score must be between 0 and {max_score}"
        ))),
    }
}

pub async fn grade_submission(
    storage: &dyn Storage,
    professor: &User,
    submission_id: i64,
    request: GradeSubmissionRequest,
) -> Result<AssignmentSubmission> {
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Submission not found"))?;
    let assignment = owned_assignment(storage, professor, submission.assignment_id).await?;

    let score = check_score(request.score, assignment.max_score)?;
    let feedback = request
        .feedback
        .map(|feedback| feedback.trim().to_string())
        .filter(|feedback| !feedback.is_empty());

    storage
        .grade_submission(submission_id, score, assignment.max_score, feedback)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Submission not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::testing::*;

    fn fields(course_id: i64, title: &str) -> AssignmentFields {
        AssignmentFields {
            course_id,
            title: title.to_string(),
            description: None,
            due_date: at("2026-06-01T12:00:00Z"),
            max_score: 10.0,
        }
    }

    #[test]
    fn test_check_score_bounds() {
        assert!(check_score(Some(-1.0), 10.0).is_err());
        assert!(check_score(Some(10.5), 10.0).is_err());
        assert!(check_score(Some(f64::NAN), 10.0).is_err());
        assert!(check_score(None, 10.0).is_err());
        assert_eq!(check_score(Some(0.0), 10.0), Ok(0.0));
        assert_eq!(check_score(Some(10.0), 10.0), Ok(10.0));
    }

    #[tokio::test]
    async fn test_grade_submission_and_owner_checks() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let prof = user(&storage, "prof", UserRole::Professor, Some(cs.id), None).await;
        let other = user(&storage, "other", UserRole::Professor, Some(cs.id), None).await;
        let alice = user(&storage, "alice", UserRole::Student, Some(cs.id), Some(1)).await;
        let os = course(&storage, "OS", Some(prof.id), cs.id, 1).await;

        assert_eq!(
            create_assignment(storage.as_ref(), &other, fields(os.id, "Lab"), None)
                .await
                .unwrap_err(),
            EduPortalError::not_found("Course not found or unauthorized")
        );
        let lab = create_assignment(storage.as_ref(), &prof, fields(os.id, "Lab"), None)
            .await
            .unwrap();
        let submission = storage
            .create_submission(lab.id, alice.id, "/uploads/a.pdf", at("2026-06-01T11:00:00Z"))
            .await
            .unwrap();

        let grade = |score| GradeSubmissionRequest {
            score,
            feedback: Some(" good ".to_string()),
        };
        assert!(matches!(
            grade_submission(storage.as_ref(), &other, submission.id, grade(Some(5.0))).await,
            Err(EduPortalError::Authorization(_))
        ));
        assert!(matches!(
            grade_submission(storage.as_ref(), &prof, submission.id, grade(Some(-1.0))).await,
            Err(EduPortalError::Validation(_))
        ));
        assert!(matches!(
            grade_submission(storage.as_ref(), &prof, submission.id, grade(Some(11.0))).await,
            Err(EduPortalError::Validation(_))
        ));

        let graded = grade_submission(storage.as_ref(), &prof, submission.id, grade(Some(10.0)))
            .await
            .unwrap();
        assert!(graded.graded);
        assert_eq!(graded.score, Some(10.0));
        assert_eq!(graded.max_score, Some(10.0));
        assert_eq!(graded.feedback.as_deref(), Some("good"));

        let zero = grade_submission(storage.as_ref(), &prof, submission.id, grade(Some(0.0)))
            .await
            .unwrap();
        assert_eq!(zero.score, Some(0.0));

        let listed = list_submissions(storage.as_ref(), &prof, lab.id).await.unwrap();
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].student_username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_update_clears_submissions() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let prof = user(&storage, "prof", UserRole::Professor, Some(cs.id), None).await;
        let alice = user(&storage, "alice", UserRole::Student, Some(cs.id), Some(1)).await;
        let os = course(&storage, "OS", Some(prof.id), cs.id, 1).await;
        let lab = create_assignment(storage.as_ref(), &prof, fields(os.id, "Lab"), None)
            .await
            .unwrap();
        storage
            .create_submission(lab.id, alice.id, "/uploads/a.pdf", at("2026-06-01T11:00:00Z"))
            .await
            .unwrap();

        let updated = update_assignment(
            storage.as_ref(),
            &prof,
            lab.id,
            fields(os.id, "Lab v2"),
            None,
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "Lab v2");
        assert!(storage
            .list_submissions_by_assignment(lab.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(list_assignments(storage.as_ref(), &prof).await.unwrap().items.len(), 1);

        delete_assignment(storage.as_ref(), &prof, lab.id).await.unwrap();
        assert!(storage.get_assignment_by_id(lab.id).await.unwrap().is_none());
    }
}
