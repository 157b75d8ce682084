use crate::errors::{EduPortalError, Result};
use crate::models::auth::UpdateProfileRequest;
use crate::models::users::entities::User;
use crate::models::users::requests::UserChanges;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_password_simple, validate_person_name, validate_username};

/// 更新个人资料：角色、院系、年级不能自行修改
pub async fn update_profile(
    storage: &dyn Storage,
    user: &User,
    request: UpdateProfileRequest,
) -> Result<User> {
    let mut changes = UserChanges::default();

    if let Some(first_name) = request.first_name {
        validate_person_name(&first_name).map_err(EduPortalError::validation)?;
        changes.first_name = Some(first_name.trim().to_string());
    }
    if let Some(last_name) = request.last_name {
        validate_person_name(&last_name).map_err(EduPortalError::validation)?;
        changes.last_name = Some(last_name.trim().to_string());
    }
    if let Some(username) = request.username {
        let username = username.trim().to_string();
        validate_username(&username).map_err(EduPortalError::validation)?;
        if let Some(existing) = storage.get_user_by_username(&username).await?
            && existing.id != user.id
        {
            return Err(EduPortalError::conflict("Username already taken"));
        }
        changes.username = Some(username);
    }
    if let Some(password) = request.password {
        validate_password_simple(&password).map_err(EduPortalError::validation)?;
        changes.password_hash = Some(hash_password(&password)?);
    }

    storage
        .update_user(user.id, changes)
        .await?
        .ok_or_else(|| EduPortalError::not_found("User not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::testing::*;

    #[tokio::test]
    async fn test_username_must_stay_unique() {
        let storage = memory_storage().await;
        let me = user(&storage, "me.user", UserRole::Student, None, None).await;
        user(&storage, "taken.name", UserRole::Student, None, None).await;

        let err = update_profile(
            storage.as_ref(),
            &me,
            UpdateProfileRequest {
                username: Some("taken.name".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EduPortalError::Conflict(_)));

        // 改回自己的用户名不算冲突
        let updated = update_profile(
            storage.as_ref(),
            &me,
            UpdateProfileRequest {
                username: Some("me.user".to_string()),
                first_name: Some(" Renamed ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.first_name, "Renamed");
        assert_eq!(updated.role, UserRole::Student);
    }
}
