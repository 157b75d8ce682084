use tracing::info;

use crate::errors::{EduPortalError, Result};
use crate::models::users::entities::{User, UserPlacement};
use crate::models::users::requests::{CreateUserRequest, NewUser};
use crate::services::enrollment;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::username::generate_username;
use crate::utils::validate::{validate_password_simple, validate_person_name};

/// 院系存在性校验，供创建和更新共用
pub(super) async fn ensure_department(
    storage: &dyn Storage,
    department_id: Option<i64>,
) -> Result<()> {
    if let Some(department_id) = department_id
        && storage.get_department_by_id(department_id).await?.is_none()
    {
        return Err(EduPortalError::not_found("Department not found"));
    }
    Ok(())
}

/// 管理员创建用户：可指定任意角色，用户名自动生成
pub async fn create_user(storage: &dyn Storage, request: CreateUserRequest) -> Result<User> {
    validate_person_name(&request.first_name).map_err(EduPortalError::validation)?;
    validate_person_name(&request.last_name).map_err(EduPortalError::validation)?;
    validate_password_simple(&request.password).map_err(EduPortalError::validation)?;
    ensure_department(storage, request.department_id).await?;

    let first_name = request.first_name.trim().to_string();
    let last_name = request.last_name.trim().to_string();
    let username = generate_username(storage, &first_name, &last_name).await?;

    let user = storage
        .create_user(NewUser {
            first_name,
            last_name,
            username,
            password_hash: hash_password(&request.password)?,
            placement: UserPlacement::new(request.role, request.department_id, request.year),
        })
        .await?;

    enrollment::enroll_student(storage, &user).await?;
    info!("Admin created user {} ({})", user.username, user.role);

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::testing::*;

    #[tokio::test]
    async fn test_create_professor_drops_year() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;

        let prof = create_user(
            storage.as_ref(),
            CreateUserRequest {
                first_name: "Alan".to_string(),
                last_name: "Turing".to_string(),
                password: "enigma1912".to_string(),
                role: UserRole::Professor,
                department_id: Some(cs.id),
                year: Some(4),
            },
        )
        .await
        .unwrap();
        assert_eq!(prof.year, None);
        assert_eq!(prof.department_id, Some(cs.id));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_department() {
        let storage = memory_storage().await;
        let err = create_user(
            storage.as_ref(),
            CreateUserRequest {
                first_name: "Alan".to_string(),
                last_name: "Turing".to_string(),
                password: "enigma1912".to_string(),
                role: UserRole::Student,
                department_id: Some(999),
                year: Some(1),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EduPortalError::NotFound(_)));
    }
}
