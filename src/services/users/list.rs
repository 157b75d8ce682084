use crate::errors::Result;
use crate::models::users::{requests::UserListQuery, responses::UserListResponse};
use crate::storage::Storage;

pub async fn list_users(storage: &dyn Storage, query: UserListQuery) -> Result<UserListResponse> {
    storage.list_users_with_pagination(query).await
}
