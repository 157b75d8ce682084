use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct AssignmentSubmission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_path: String,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    pub feedback: Option<String>,
    pub graded: bool,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
