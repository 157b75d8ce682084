use serde::Deserialize;
use ts_rs::TS;

// 新增课时请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lecture.ts")]
pub struct CreateLectureRequest {
    pub title: String,
    pub description: Option<String>,
    pub youtube_url: String,
    pub order: Option<i32>,
}

// 更新课时请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lecture.ts")]
pub struct UpdateLectureRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub youtube_url: Option<String>,
    pub order: Option<i32>,
}
