use serde::Deserialize;
use ts_rs::TS;

// 创建/更新课程请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseRequest {
    pub name: String,
    pub professor_id: Option<i64>,
    pub department_id: i64,
    pub year: i32,
}
