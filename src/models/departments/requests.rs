use serde::Deserialize;
use ts_rs::TS;

// 创建/更新院系请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentRequest {
    pub name: String,
}
