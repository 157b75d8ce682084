use serde::Deserialize;
use ts_rs::TS;

// 学生提交答卷请求，answers 与题目按下标对齐
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct SubmitExamRequest {
    pub answers: Vec<Option<String>>,
}

// 单题人工批改
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct GradedAnswer {
    pub question_index: usize,
    pub points: f64,
    pub is_correct: Option<bool>,
}

// 教师批改答卷请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct GradeAttemptRequest {
    pub graded_answers: Vec<GradedAnswer>,
}

/// 写入存储层的新答卷
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub exam_id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub answers: Vec<super::entities::AttemptAnswer>,
    pub total_score: f64,
    pub grading_status: super::entities::GradingStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
