use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

// 管理员创建用户请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: UserRole,
    pub department_id: Option<i64>,
    pub year: Option<i32>,
}

// 管理员更新用户请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub role: Option<UserRole>,
    pub department_id: Option<i64>,
    pub year: Option<i32>,
}

// 用户列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

/// 写入存储层的新用户记录（密码已哈希，用户名已生成）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password_hash: String,
    pub placement: super::entities::UserPlacement,
}

/// 写入存储层的用户变更；`placement` 为 None 表示不改动角色与归属
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub placement: Option<super::entities::UserPlacement>,
}
