use tracing::info;

use crate::errors::{EduPortalError, Result};
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

/// 用户名密码登录，签发单个 token
pub async fn login(storage: &dyn Storage, login_request: LoginRequest) -> Result<LoginResponse> {
    let user = storage
        .get_user_by_username(login_request.username.trim())
        .await?
        .filter(|user| verify_password(&login_request.password, &user.password_hash))
        .ok_or_else(|| EduPortalError::authentication("Invalid credentials"))?;

    let token = JwtUtils::generate_token(user.id, user.role.as_str())
        .map_err(|e| EduPortalError::token(format!("Failed to generate JWT token: {e}")))?;

    info!("User {} logged in successfully", user.username);

    Ok(LoginResponse {
        token,
        expires_in: JwtUtils::expires_in(),
        user,
    })
}
