use tracing::info;

use crate::errors::{EduPortalError, Result};
use crate::models::auth::{AuthResponse, RegisterRequest};
use crate::models::users::entities::{UserPlacement, UserRole};
use crate::models::users::requests::NewUser;
use crate::services::enrollment;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::username::generate_username;
use crate::utils::validate::{validate_password_simple, validate_person_name};

/// 自助注册：只能选择学生或教师角色，注册后自动选课并签发 token
pub async fn register(storage: &dyn Storage, request: RegisterRequest) -> Result<AuthResponse> {
    validate_person_name(&request.first_name).map_err(EduPortalError::validation)?;
    validate_person_name(&request.last_name).map_err(EduPortalError::validation)?;
    validate_password_simple(&request.password).map_err(EduPortalError::validation)?;

    let role = request.role.unwrap_or(UserRole::Student);
    if role == UserRole::Admin {
        return Err(EduPortalError::validation(
            "Self-registration is only available for students and professors",
        ));
    }

    if let Some(department_id) = request.department_id
        && storage.get_department_by_id(department_id).await?.is_none()
    {
        return Err(EduPortalError::not_found("Department not found"));
    }

    let first_name = request.first_name.trim().to_string();
    let last_name = request.last_name.trim().to_string();
    let username = generate_username(storage, &first_name, &last_name).await?;

    let user = storage
        .create_user(NewUser {
            first_name,
            last_name,
            username,
            password_hash: hash_password(&request.password)?,
            placement: UserPlacement::new(role, request.department_id, request.year),
        })
        .await?;

    enrollment::enroll_student(storage, &user).await?;

    let token = JwtUtils::generate_token(user.id, user.role.as_str())
        .map_err(|e| EduPortalError::token(format!("Failed to generate JWT token: {e}")))?;

    info!("User {} registered as {}", user.username, user.role);

    Ok(AuthResponse { token, user })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::LoginRequest;
    use crate::services::auth::login::login;
    use crate::storage::testing::*;

    fn request(role: Option<UserRole>) -> RegisterRequest {
        RegisterRequest {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            password: "cobol1959".to_string(),
            role,
            department_id: None,
            year: None,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let storage = memory_storage().await;
        let registered = register(storage.as_ref(), request(None)).await.unwrap();
        assert_eq!(registered.user.role, UserRole::Student);
        assert!(registered.user.username.starts_with("grace.hopper."));

        let claims = JwtUtils::verify_token(&registered.token).unwrap();
        assert_eq!(claims.user_id(), Some(registered.user.id));

        let logged_in = login(
            storage.as_ref(),
            LoginRequest {
                username: registered.user.username.clone(),
                password: "cobol1959".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
        assert_eq!(logged_in.expires_in, 30 * 24 * 3600);

        let err = login(
            storage.as_ref(),
            LoginRequest {
                username: registered.user.username,
                password: "wrong-password1".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EduPortalError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_admin_and_weak_password() {
        let storage = memory_storage().await;
        let err = register(storage.as_ref(), request(Some(UserRole::Admin)))
            .await
            .unwrap_err();
        assert!(matches!(err, EduPortalError::Validation(_)));

        let weak = RegisterRequest {
            password: "short".to_string(),
            ..request(None)
        };
        assert!(matches!(
            register(storage.as_ref(), weak).await.unwrap_err(),
            EduPortalError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_register_student_auto_enrolls() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let os = course(&storage, "OS", None, cs.id, 2).await;

        let registered = register(
            storage.as_ref(),
            RegisterRequest {
                department_id: Some(cs.id),
                year: Some(2),
                ..request(None)
            },
        )
        .await
        .unwrap();
        assert!(
            storage
                .is_course_student(os.id, registered.user.id)
                .await
                .unwrap()
        );
    }
}
