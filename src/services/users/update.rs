use crate::errors::{EduPortalError, Result};
use crate::models::users::entities::{User, UserPlacement};
use crate::models::users::requests::{UpdateUserRequest, UserChanges};
use crate::services::{enrollment, found};
use crate::storage::Storage;
use crate::utils::validate::{validate_person_name, validate_username};

use super::create::ensure_department;

/// 管理员更新用户；角色、院系、年级任一变化时整体重算归属，然后自动选课
pub async fn update_user(
    storage: &dyn Storage,
    user_id: i64,
    request: UpdateUserRequest,
) -> Result<User> {
    let existing = found(storage.get_user_by_id(user_id).await?, "User not found")?;
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
        if let Some(other) = storage.get_user_by_username(&username).await?
            && other.id != user_id
        {
            return Err(EduPortalError::conflict("Username already taken"));
        }
        changes.username = Some(username);
    }

    if request.role.is_some() || request.department_id.is_some() || request.year.is_some() {
        ensure_department(storage, request.department_id).await?;
        changes.placement = Some(UserPlacement::new(
            request.role.unwrap_or(existing.role),
            request.department_id.or(existing.department_id),
            request.year.or(existing.year),
        ));
    }

    let user = found(storage.update_user(user_id, changes).await?, "User not found")?;
    enrollment::enroll_student(storage, &user).await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::testing::*;

    #[tokio::test]
    async fn test_update_enrolls_and_never_unenrolls() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let os = course(&storage, "OS", None, cs.id, 1).await;
        let networks = course(&storage, "Networks", None, cs.id, 2).await;
        let student = user(&storage, "s1", UserRole::Student, Some(cs.id), None).await;

        update_user(
            storage.as_ref(),
            student.id,
            UpdateUserRequest {
                year: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(storage.is_course_student(os.id, student.id).await.unwrap());

        let promoted = update_user(
            storage.as_ref(),
            student.id,
            UpdateUserRequest {
                year: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(promoted.year, Some(2));
        assert!(storage.is_course_student(networks.id, student.id).await.unwrap());
        assert!(storage.is_course_student(os.id, student.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_role_change_to_professor_clears_year() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let student = user(&storage, "s1", UserRole::Student, Some(cs.id), Some(3)).await;

        let prof = update_user(
            storage.as_ref(),
            student.id,
            UpdateUserRequest {
                role: Some(UserRole::Professor),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(prof.role, UserRole::Professor);
        assert_eq!(prof.year, None);
        assert_eq!(prof.department_id, Some(cs.id));
    }
}
