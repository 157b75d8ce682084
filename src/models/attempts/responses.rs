use serde::Serialize;
use ts_rs::TS;

use super::entities::ExamAttempt;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct SubmitExamResponse {
    pub attempt: ExamAttempt,
    pub total_points: f64,
}
