use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Admin,     // 管理员
    Professor, // 教师
    Student,   // 学生
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const PROFESSOR: &'static str = "professor";
    pub const STUDENT: &'static str = "student";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn professor_roles() -> &'static [&'static UserRole] {
        &[&Self::Professor]
    }
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => Self::ADMIN,
            UserRole::Professor => Self::PROFESSOR,
            UserRole::Student => Self::STUDENT,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: admin, professor, student"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ADMIN => Ok(UserRole::Admin),
            Self::PROFESSOR => Ok(UserRole::Professor),
            Self::STUDENT => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

/// 用户的角色与归属
///
/// 年级只对学生有意义，构造时对非学生角色丢弃年级。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserPlacement {
    role: UserRole,
    department_id: Option<i64>,
    year: Option<i32>,
}

impl UserPlacement {
    pub fn new(role: UserRole, department_id: Option<i64>, year: Option<i32>) -> Self {
        Self {
            role,
            department_id,
            year: if role == UserRole::Student { year } else { None },
        }
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn department_id(&self) -> Option<i64> {
        self.department_id
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub department_id: Option<i64>,
    pub year: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn placement(&self) -> UserPlacement {
        UserPlacement::new(self.role, self.department_id, self.year)
    }

    /// 学生的 (院系, 年级)，两者都存在时才返回
    pub fn cohort(&self) -> Option<(i64, i32)> {
        match (self.role, self.department_id, self.year) {
            (UserRole::Student, Some(department_id), Some(year)) => Some((department_id, year)),
            _ => None,
        }
    }
}
