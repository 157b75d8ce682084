use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业附件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AttachedFile {
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub max_score: f64,
    pub pdf: Option<AttachedFile>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 截止时间当刻仍可提交
    pub fn accepts_submission_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        now <= self.due_date
    }
}
