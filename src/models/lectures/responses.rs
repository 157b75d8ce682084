use serde::Serialize;
use ts_rs::TS;

use super::entities::Lecture;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lecture.ts")]
pub struct LectureListResponse {
    pub items: Vec<Lecture>,
}
