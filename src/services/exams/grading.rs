//! 判分：提交时自动判分，教师人工批改，成绩榜

use std::collections::HashMap;

use crate::errors::{EduPortalError, Result};
use crate::models::attempts::{
    entities::{AttemptAnswer, ExamAttempt, GradingStatus},
    requests::GradeAttemptRequest,
};
use crate::models::exams::{
    entities::{Exam, Question},
    responses::{AttemptDetailResponse, ExamGradeEntry, ExamGradesResponse},
};
use crate::models::users::entities::User;
use crate::services::courses::ownership::ensure_course_owner;
use crate::storage::Storage;

use super::manage::owned_exam;

/// 按题目自动判分：可自动判分的题目答案完全一致得满分，照片作答题得 0 分且不判对错
pub fn auto_grade(questions: &[Question], answers: Vec<String>) -> Vec<AttemptAnswer> {
    questions
        .iter()
        .zip(answers)
        .map(|(question, answer)| match question.kind.correct_answer() {
            Some(correct) => {
                let is_correct = answer == correct;
                AttemptAnswer {
                    score: if is_correct { question.points } else { 0.0 },
                    is_correct: Some(is_correct),
                    manually_graded: false,
                    answer,
                }
            }
            None => AttemptAnswer {
                answer,
                score: 0.0,
                is_correct: None,
                manually_graded: false,
            },
        })
        .collect()
}

pub fn total_score(answers: &[AttemptAnswer]) -> f64 {
    answers.iter().map(|answer| answer.score).sum()
}

/// 成绩榜，按总分降序
pub async fn get_exam_grades(
    storage: &dyn Storage,
    professor: &User,
    exam_id: i64,
) -> Result<ExamGradesResponse> {
    let exam = owned_exam(storage, professor, exam_id).await?;
    let mut attempts = storage.list_attempts_by_exam(exam_id).await?;
    attempts.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    let user_ids: Vec<i64> = attempts.iter().map(|attempt| attempt.user_id).collect();
    let students: HashMap<i64, User> = storage
        .get_users_by_ids(&user_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    let attempts = attempts
        .into_iter()
        .map(|attempt| {
            let (student_name, student_username) = match students.get(&attempt.user_id) {
                Some(student) => (student.full_name(), student.username.clone()),
                None => ("Unknown".to_string(), String::new()),
            };
            ExamGradeEntry {
                attempt_id: attempt.id,
                student_id: attempt.user_id,
                student_name,
                student_username,
                total_score: attempt.total_score,
                grading_status: attempt.grading_status,
                submitted_at: attempt.submitted_at,
            }
        })
        .collect();

    Ok(ExamGradesResponse {
        exam_id: exam.id,
        exam_title: exam.title,
        total_points: exam.total_points,
        attempts,
    })
}

async fn attempt_with_exam(
    storage: &dyn Storage,
    professor: &User,
    attempt_id: i64,
) -> Result<(ExamAttempt, Exam)> {
    let attempt = storage
        .get_attempt_by_id(attempt_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Exam attempt not found"))?;
    let exam = storage
        .get_exam_by_id(attempt.exam_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Exam not found"))?;
    ensure_course_owner(storage, professor, exam.course_id).await?;
    Ok((attempt, exam))
}

pub async fn get_attempt_detail(
    storage: &dyn Storage,
    professor: &User,
    attempt_id: i64,
) -> Result<AttemptDetailResponse> {
    let (attempt, exam) = attempt_with_exam(storage, professor, attempt_id).await?;
    let student = storage.get_user_by_id(attempt.user_id).await?;
    Ok(AttemptDetailResponse {
        exam,
        student_name: student.as_ref().map(User::full_name),
        student_username: student.map(|student| student.username),
        attempt,
    })
}

/// 人工批改：覆盖指定题目的得分，重新计算总分与批改状态
pub async fn grade_exam_attempt(
    storage: &dyn Storage,
    professor: &User,
    attempt_id: i64,
    request: GradeAttemptRequest,
) -> Result<ExamAttempt> {
    let (attempt, exam) = attempt_with_exam(storage, professor, attempt_id).await?;
    let mut answers = attempt.answers;

    for graded in request.graded_answers {
        let index = graded.question_index;
        let (Some(question), Some(answer)) = (exam.questions.get(index), answers.get_mut(index))
        else {
            return Err(EduPortalError::validation(format!(
                "Question index {index} is out of range"
            )));
        };
        if !graded.points.is_finite() || graded.points < 0.0 || graded.points > question.points {
            return Err(EduPortalError::validation(format!(
                "Points for question {index} must be between 0 and {}",
                question.points
            )));
        }
        answer.score = graded.points;
        answer.is_correct = graded.is_correct;
        answer.manually_graded = true;
    }

    let total = total_score(&answers);
    let status = GradingStatus::from_answers(&answers, attempt.grading_status);
    storage
        .update_attempt_grading(attempt_id, answers, total, status)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Exam attempt not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attempts::requests::{GradedAnswer, NewAttempt};
    use crate::models::users::entities::UserRole;
    use crate::storage::testing::*;

    #[test]
    fn test_auto_grade_exact_match_and_photo() {
        let questions = sample_questions();
        let graded = auto_grade(&questions, vec!["B".to_string(), "photo.png".to_string()]);
        assert_eq!(graded[0].score, 2.0);
        assert_eq!(graded[0].is_correct, Some(true));
        assert_eq!(graded[1].score, 0.0);
        assert_eq!(graded[1].is_correct, None);
        assert_eq!(total_score(&graded), 2.0);

        let wrong = auto_grade(&questions, vec!["b".to_string(), "x".to_string()]);
        assert_eq!(wrong[0].score, 0.0);
        assert_eq!(wrong[0].is_correct, Some(false));
    }

    #[tokio::test]
    async fn test_manual_grading_recomputes_total_and_status() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let prof = user(&storage, "prof", UserRole::Professor, Some(cs.id), None).await;
        let other = user(&storage, "other", UserRole::Professor, Some(cs.id), None).await;
        let alice = user(&storage, "alice", UserRole::Student, Some(cs.id), Some(1)).await;
        let os = course(&storage, "OS", Some(prof.id), cs.id, 1).await;
        let midterm = exam(
            &storage,
            os.id,
            at("2026-05-01T09:00:00Z"),
            at("2026-05-01T10:00:00Z"),
        )
        .await;

        let answers = auto_grade(&midterm.questions, vec!["B".to_string(), "p.png".to_string()]);
        let attempt = storage
            .create_attempt(NewAttempt {
                exam_id: midterm.id,
                user_id: alice.id,
                course_id: os.id,
                grading_status: GradingStatus::from_answers(&answers, GradingStatus::Ungraded),
                total_score: total_score(&answers),
                answers,
                submitted_at: at("2026-05-01T09:30:00Z"),
            })
            .await
            .unwrap();
        assert_eq!(attempt.grading_status, GradingStatus::PartiallyGraded);

        let grade = |index, points| GradeAttemptRequest {
            graded_answers: vec![GradedAnswer {
                question_index: index,
                points,
                is_correct: Some(true),
            }],
        };

        assert!(matches!(
            grade_exam_attempt(storage.as_ref(), &other, attempt.id, grade(1, 1.0)).await,
            Err(EduPortalError::Authorization(_))
        ));
        assert!(matches!(
            grade_exam_attempt(storage.as_ref(), &prof, attempt.id, grade(5, 1.0)).await,
            Err(EduPortalError::Validation(_))
        ));
        assert!(matches!(
            grade_exam_attempt(storage.as_ref(), &prof, attempt.id, grade(1, 3.5)).await,
            Err(EduPortalError::Validation(_))
        ));

        let graded = grade_exam_attempt(storage.as_ref(), &prof, attempt.id, grade(1, 2.5))
            .await
            .unwrap();
        assert_eq!(graded.total_score, 4.5);
        assert_eq!(graded.grading_status, GradingStatus::FullyGraded);
        assert!(graded.answers[1].manually_graded);

        let board = get_exam_grades(storage.as_ref(), &prof, midterm.id).await.unwrap();
        assert_eq!(board.attempts.len(), 1);
        assert_eq!(board.attempts[0].student_username, "alice");
        assert_eq!(board.attempts[0].total_score, 4.5);

        let detail = get_attempt_detail(storage.as_ref(), &prof, attempt.id).await.unwrap();
        assert_eq!(detail.student_name.as_deref(), Some("alice Test"));
    }

    #[tokio::test]
    async fn test_grades_sorted_and_empty() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let prof = user(&storage, "prof", UserRole::Professor, Some(cs.id), None).await;
        let os = course(&storage, "OS", Some(prof.id), cs.id, 1).await;
        let midterm = exam(
            &storage,
            os.id,
            at("2026-05-01T09:00:00Z"),
            at("2026-05-01T10:00:00Z"),
        )
        .await;

        let empty = get_exam_grades(storage.as_ref(), &prof, midterm.id).await.unwrap();
        assert!(empty.attempts.is_empty());
        assert_eq!(empty.total_points, 5.0);

        for (name, answer) in [("low", "A"), ("high", "B")] {
            let student = user(&storage, name, UserRole::Student, Some(cs.id), Some(1)).await;
            let answers = auto_grade(&midterm.questions, vec![answer.to_string(), "p".to_string()]);
            storage
                .create_attempt(NewAttempt {
                    exam_id: midterm.id,
                    user_id: student.id,
                    course_id: os.id,
                    grading_status: GradingStatus::PartiallyGraded,
                    total_score: total_score(&answers),
                    answers,
                    submitted_at: at("2026-05-01T09:30:00Z"),
                })
                .await
                .unwrap();
        }
        let board = get_exam_grades(storage.as_ref(), &prof, midterm.id).await.unwrap();
        let names: Vec<&str> = board
            .attempts
            .iter()
            .map(|entry| entry.student_username.as_str())
            .collect();
        assert_eq!(names, ["high", "low"]);
    }
}
