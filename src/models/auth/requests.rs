use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 登录请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// 自助注册请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub department_id: Option<i64>,
    pub year: Option<i32>,
}

// 更新个人资料请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}
