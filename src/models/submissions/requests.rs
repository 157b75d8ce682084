use serde::Deserialize;
use ts_rs::TS;

// 作业评分请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub score: Option<f64>,
    pub feedback: Option<String>,
}
