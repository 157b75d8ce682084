//! 学生作答考试

use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::{EduPortalError, Result};
use crate::models::attempts::{
    entities::GradingStatus,
    requests::{NewAttempt, SubmitExamRequest},
    responses::SubmitExamResponse,
};
use crate::models::exams::{entities::StudentExam, responses::StudentAttemptResponse};
use crate::models::users::entities::User;
use crate::services::enrollment::can_access_course;
use crate::services::exams::grading::{auto_grade, total_score};
use crate::storage::Storage;

/// 提交答卷
///
/// 校验顺序：考试存在、已选课、在作答窗口内（两端包含）、未作答过、答案数量一致、每题都有答案。
/// 答案原样保存并与标准答案做精确比较。
/// 并发的重复提交由唯一索引拦下，同样返回 Conflict。
pub async fn submit_exam_attempt(
    storage: &dyn Storage,
    student: &User,
    exam_id: i64,
    request: SubmitExamRequest,
    now: DateTime<Utc>,
) -> Result<SubmitExamResponse> {
    let exam = storage
        .get_exam_by_id(exam_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Exam not found"))?;

    let course = storage
        .get_course_by_id(exam.course_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Course not found"))?;
    if !can_access_course(storage, student, &course).await? {
        return Err(EduPortalError::authorization("You are not enrolled in this course"));
    }

    if !exam.is_open_at(now) {
        return Err(EduPortalError::validation("The exam is not open for submissions"));
    }

    if storage
        .get_attempt_by_user_and_exam(student.id, exam.id)
        .await?
        .is_some()
    {
        return Err(EduPortalError::conflict("You have already submitted this exam"));
    }

    if request.answers.len() != exam.questions.len() {
        return Err(EduPortalError::validation(format!(
            "Expected {} answers, got {}",
            exam.questions.len(),
            request.answers.len()
        )));
    }

    let answers = request
        .answers
        .into_iter()
        .enumerate()
        .map(|(index, answer)| {
            answer.ok_or_else(|| {
                EduPortalError::validation(format!("Question {} has no answer", index + 1))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let answers = auto_grade(&exam.questions, answers);
    let attempt = storage
        .create_attempt(NewAttempt {
            exam_id: exam.id,
            user_id: student.id,
            course_id: exam.course_id,
            total_score: total_score(&answers),
            grading_status: GradingStatus::from_answers(&answers, GradingStatus::Ungraded),
            answers,
            submitted_at: now,
        })
        .await?;

    info!(
        "Student {} submitted exam {} scoring {}",
        student.id, exam.id, attempt.total_score
    );
    Ok(SubmitExamResponse {
        attempt,
        total_points: exam.total_points,
    })
}

/// 学生查看自己的答卷，考试以去掉标准答案的形式返回
pub async fn get_exam_attempt(
    storage: &dyn Storage,
    student: &User,
    exam_id: i64,
) -> Result<StudentAttemptResponse> {
    let exam = storage
        .get_exam_by_id(exam_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Exam not found"))?;
    let attempt = storage
        .get_attempt_by_user_and_exam(student.id, exam_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Exam attempt not found"))?;
    Ok(StudentAttemptResponse {
        exam: StudentExam::from_exam(&exam, true),
        attempt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::testing::*;

    fn answers(values: &[Option<&str>]) -> SubmitExamRequest {
        SubmitExamRequest {
            answers: values.iter().map(|v| v.map(str::to_string)).collect(),
        }
    }

    #[tokio::test]
    async fn test_window_is_inclusive() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let os = course(&storage, "OS", None, cs.id, 1).await;
        let midterm = exam(
            &storage,
            os.id,
            at("2026-05-01T09:00:00Z"),
            at("2026-05-01T10:00:00Z"),
        )
        .await;
        let early = user(&storage, "early", UserRole::Student, Some(cs.id), Some(1)).await;
        let late = user(&storage, "late", UserRole::Student, Some(cs.id), Some(1)).await;
        let edge = user(&storage, "edge", UserRole::Student, Some(cs.id), Some(1)).await;
        let body = || answers(&[Some("B"), Some("photo.png")]);

        let before = submit_exam_attempt(
            storage.as_ref(),
            &early,
            midterm.id,
            body(),
            at("2026-05-01T08:59:59Z"),
        )
        .await;
        assert!(matches!(before, Err(EduPortalError::Validation(_))));

        let after = submit_exam_attempt(
            storage.as_ref(),
            &late,
            midterm.id,
            body(),
            at("2026-05-01T10:00:01Z"),
        )
        .await;
        assert!(matches!(after, Err(EduPortalError::Validation(_))));

        let ok = submit_exam_attempt(
            storage.as_ref(),
            &edge,
            midterm.id,
            body(),
            at("2026-05-01T10:00:00Z"),
        )
        .await
        .unwrap();
        assert_eq!(ok.attempt.total_score, 2.0);
        assert_eq!(ok.total_points, 5.0);
        assert_eq!(ok.attempt.grading_status, GradingStatus::PartiallyGraded);
        assert_eq!(ok.attempt.answers[1].is_correct, None);
    }

    #[tokio::test]
    async fn test_submission_checks_in_order() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let os = course(&storage, "OS", None, cs.id, 1).await;
        let midterm = exam(
            &storage,
            os.id,
            at("2026-05-01T09:00:00Z"),
            at("2026-05-01T10:00:00Z"),
        )
        .await;
        let alice = user(&storage, "alice", UserRole::Student, Some(cs.id), Some(1)).await;
        let outsider = user(&storage, "out", UserRole::Student, Some(cs.id), Some(4)).await;
        let now = at("2026-05-01T09:30:00Z");

        let missing = submit_exam_attempt(storage.as_ref(), &alice, 9999, answers(&[]), now).await;
        assert!(matches!(missing, Err(EduPortalError::NotFound(_))));

        let foreign =
            submit_exam_attempt(storage.as_ref(), &outsider, midterm.id, answers(&[]), now).await;
        assert!(matches!(foreign, Err(EduPortalError::Authorization(_))));

        let short =
            submit_exam_attempt(storage.as_ref(), &alice, midterm.id, answers(&[Some("B")]), now)
                .await;
        assert!(matches!(short, Err(EduPortalError::Validation(_))));

        let err = submit_exam_attempt(
            storage.as_ref(),
            &alice,
            midterm.id,
            answers(&[Some("B"), None]),
            now,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EduPortalError::Validation(_)));
        assert!(err.message().contains("Question 2"));

        let wrong = submit_exam_attempt(
            storage.as_ref(),
            &alice,
            midterm.id,
            answers(&[Some("A"), Some("p")]),
            now,
        )
        .await
        .unwrap();
        assert_eq!(wrong.attempt.total_score, 0.0);
        assert_eq!(wrong.attempt.answers[0].is_correct, Some(false));

        let again = submit_exam_attempt(
            storage.as_ref(),
            &alice,
            midterm.id,
            answers(&[Some("B"), Some("p")]),
            now,
        )
        .await;
        assert!(matches!(again, Err(EduPortalError::Conflict(_))));

        let own = get_exam_attempt(storage.as_ref(), &alice, midterm.id)
            .await
            .unwrap();
        assert_eq!(own.attempt.id, wrong.attempt.id);
        assert!(own.exam.attempted);
        assert!(!serde_json::to_string(&own).unwrap().contains("correct_answer"));
    }

    #[tokio::test]
    async fn test_answers_compared_exactly() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let os = course(&storage, "OS", None, cs.id, 1).await;
        let midterm = exam(
            &storage,
            os.id,
            at("2026-05-01T09:00:00Z"),
            at("2026-05-01T10:00:00Z"),
        )
        .await;
        let padded = user(&storage, "padded", UserRole::Student, Some(cs.id), Some(1)).await;
        let blank = user(&storage, "blank", UserRole::Student, Some(cs.id), Some(1)).await;
        let now = at("2026-05-01T09:30:00Z");

        let result = submit_exam_attempt(
            storage.as_ref(),
            &padded,
            midterm.id,
            answers(&[Some(" B "), Some("p")]),
            now,
        )
        .await
        .unwrap();
        assert_eq!(result.attempt.total_score, 0.0);
        assert_eq!(result.attempt.answers[0].answer, " B ");
        assert_eq!(result.attempt.answers[0].is_correct, Some(false));

        let result = submit_exam_attempt(
            storage.as_ref(),
            &blank,
            midterm.id,
            answers(&[Some(""), Some("p")]),
            now,
        )
        .await
        .unwrap();
        assert_eq!(result.attempt.total_score, 0.0);
        assert_eq!(result.attempt.answers[0].answer, "");
        assert_eq!(result.attempt.answers[0].is_correct, Some(false));
    }
}
