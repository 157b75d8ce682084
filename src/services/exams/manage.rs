//! 考试的创建、查询、元数据修改与删除（教师）

use chrono::{DateTime, Utc};

use crate::errors::{EduPortalError, Result};
use crate::models::exams::{
    entities::{Exam, Question},
    requests::{CreateExamRequest, ExamChanges, NewExam, UpdateExamRequest},
    responses::ExamListResponse,
};
use crate::models::users::entities::User;
use crate::services::courses::ownership::{ensure_course_owner, owned_course};
use crate::storage::Storage;

fn clean_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(EduPortalError::validation("Exam title is required"));
    }
    Ok(title.to_string())
}

/// 时长必须为正，结束时间不得早于开始时间
fn check_schedule(duration: i32, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Result<()> {
    if duration <= 0 {
        return Err(EduPortalError::validation("Exam duration must be positive"));
    }
    if end_date < start_date {
        return Err(EduPortalError::validation(
            "Exam end date must not be before its start date",
        ));
    }
    Ok(())
}

/// 考试存在且属于该教师任教的课程
pub(super) async fn owned_exam(
    storage: &dyn Storage,
    professor: &User,
    exam_id: i64,
) -> Result<Exam> {
    let exam = storage
        .get_exam_by_id(exam_id)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Exam not found"))?;
    ensure_course_owner(storage, professor, exam.course_id).await?;
    Ok(exam)
}

pub async fn create_exam(
    storage: &dyn Storage,
    professor: &User,
    request: CreateExamRequest,
) -> Result<Exam> {
    owned_course(storage, professor, request.course_id).await?;

    let title = clean_title(&request.title)?;
    if request.questions.is_empty() {
        return Err(EduPortalError::validation("An exam needs at least one question"));
    }
    let questions = request
        .questions
        .into_iter()
        .map(Question::try_from)
        .collect::<Result<Vec<_>>>()?;
    check_schedule(request.duration, request.start_date, request.end_date)?;

    let total_points = questions.iter().map(|question| question.points).sum();
    storage
        .create_exam(NewExam {
            course_id: request.course_id,
            title,
            description: request.description,
            questions,
            duration: request.duration,
            start_date: request.start_date,
            end_date: request.end_date,
            total_points,
        })
        .await
}

/// 该教师全部任教课程下的考试
pub async fn list_exams(storage: &dyn Storage, professor: &User) -> Result<ExamListResponse> {
    let course_ids: Vec<i64> = storage
        .list_courses_by_professor(professor.id)
        .await?
        .iter()
        .map(|course| course.id)
        .collect();
    let items = storage.list_exams_by_courses(&course_ids).await?;
    Ok(ExamListResponse { items })
}

pub async fn get_exam(storage: &dyn Storage, professor: &User, exam_id: i64) -> Result<Exam> {
    owned_exam(storage, professor, exam_id).await
}

/// 只修改元数据，题目创建后不可变，已有答卷与题目的下标对齐关系因此保持
pub async fn update_exam(
    storage: &dyn Storage,
    professor: &User,
    exam_id: i64,
    request: UpdateExamRequest,
) -> Result<Exam> {
    let exam = owned_exam(storage, professor, exam_id).await?;

    let title = match &request.title {
        Some(title) => clean_title(title)?,
        None => exam.title,
    };
    let changes = ExamChanges {
        title,
        description: request.description.or(exam.description),
        duration: request.duration.unwrap_or(exam.duration),
        start_date: request.start_date.unwrap_or(exam.start_date),
        end_date: request.end_date.unwrap_or(exam.end_date),
    };
    check_schedule(changes.duration, changes.start_date, changes.end_date)?;

    storage
        .update_exam(exam_id, changes)
        .await?
        .ok_or_else(|| EduPortalError::not_found("Exam not found"))
}

pub async fn delete_exam(storage: &dyn Storage, professor: &User, exam_id: i64) -> Result<()> {
    owned_exam(storage, professor, exam_id).await?;
    storage.delete_exam_cascade(exam_id).await?;
    Ok(())
}
