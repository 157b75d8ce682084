use crate::errors::Result;
use crate::models::users::entities::User;
use crate::services::found;
use crate::storage::Storage;

pub async fn get_user(storage: &dyn Storage, user_id: i64) -> Result<User> {
    found(storage.get_user_by_id(user_id).await?, "User not found")
}
