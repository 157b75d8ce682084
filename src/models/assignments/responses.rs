use serde::Serialize;
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::submissions::entities::AssignmentSubmission;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
}

/// 学生视角的作业：附带自己的提交
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentAssignment {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub submission: Option<AssignmentSubmission>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentAssignmentListResponse {
    pub items: Vec<StudentAssignment>,
}
