pub mod assignments;
pub mod attempts;
pub mod auth;
pub mod common;
pub mod courses;
pub mod departments;
pub mod exams;
pub mod lectures;
pub mod submissions;
pub mod system;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
