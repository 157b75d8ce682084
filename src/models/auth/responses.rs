use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::User;

// 注册响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// 登录响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64, // 秒
    pub user: User,
}
