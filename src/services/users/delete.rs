use tracing::warn;

use crate::errors::{EduPortalError, Result};
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 删除用户及其名单、答卷与作业提交；任教课程的教师置空。管理员不能删除自己。
pub async fn delete_user(storage: &dyn Storage, admin: &User, user_id: i64) -> Result<()> {
    if admin.id == user_id {
        return Err(EduPortalError::validation("Cannot delete current user"));
    }

    if !storage.delete_user_cascade(user_id).await? {
        return Err(EduPortalError::not_found("User not found"));
    }

    warn!("User {} deleted by admin {}", user_id, admin.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::testing::*;

    #[tokio::test]
    async fn test_admin_cannot_delete_self() {
        let storage = memory_storage().await;
        let admin = user(&storage, "admin", UserRole::Admin, None, None).await;
        let other = user(&storage, "other", UserRole::Student, None, None).await;

        assert!(matches!(
            delete_user(storage.as_ref(), &admin, admin.id).await.unwrap_err(),
            EduPortalError::Validation(_)
        ));
        delete_user(storage.as_ref(), &admin, other.id).await.unwrap();
        assert!(matches!(
            delete_user(storage.as_ref(), &admin, other.id).await.unwrap_err(),
            EduPortalError::NotFound(_)
        ));
    }
}
