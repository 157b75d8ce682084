use serde::Serialize;
use ts_rs::TS;

use super::entities::{Exam, StudentExam};
use crate::models::attempts::entities::{ExamAttempt, GradingStatus};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListResponse {
    pub items: Vec<Exam>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct StudentExamListResponse {
    pub items: Vec<StudentExam>,
}

/// 成绩榜中的一行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamGradeEntry {
    pub attempt_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_username: String,
    pub total_score: f64,
    pub grading_status: GradingStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamGradesResponse {
    pub exam_id: i64,
    pub exam_title: String,
    pub total_points: f64,
    pub attempts: Vec<ExamGradeEntry>,
}

/// 学生查看自己的答卷
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct StudentAttemptResponse {
    pub exam: StudentExam,
    pub attempt: ExamAttempt,
}

/// 教师批改时查看的答卷详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct AttemptDetailResponse {
    pub exam: Exam,
    pub attempt: ExamAttempt,
    pub student_name: Option<String>,
    pub student_username: Option<String>,
}
