use serde::Serialize;
use ts_rs::TS;

use super::entities::AssignmentSubmission;

/// 教师查看的提交：附带学生姓名
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionView {
    #[serde(flatten)]
    pub submission: AssignmentSubmission,
    pub student_name: Option<String>,
    pub student_username: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub assignment_id: i64,
    pub items: Vec<SubmissionView>,
}
