use serde::Serialize;
use ts_rs::TS;

use super::entities::Course;
use crate::models::PaginationInfo;
use crate::models::departments::entities::Department;
use crate::models::lectures::entities::Lecture;
use crate::models::users::responses::UserSummary;

/// 课程详情视图：带教师、院系、学生名单与课时
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseView {
    #[serde(flatten)]
    pub course: Course,
    pub professor: Option<UserSummary>,
    pub department: Option<Department>,
    pub students: Vec<UserSummary>,
    pub lectures: Vec<Lecture>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub items: Vec<CourseView>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseViewList {
    pub items: Vec<CourseView>,
}
