use super::{SeaOrmStorage, cascade, db_error};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::Result;
use crate::models::{
    PaginationInfo, PaginationQuery,
    users::{
        entities::{User, UserRole},
        requests::{NewUser, UserChanges, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, user: NewUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            role: Set(user.placement.role().to_string()),
            department_id: Set(user.placement.department_id()),
            year: Set(user.placement.year()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建用户失败"))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_error("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 批量获取用户
    pub async fn get_users_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .all(&self.db)
            .await
            .map_err(db_error("批量查询用户失败"))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = PaginationQuery {
            page: query.page.unwrap_or(1),
            size: query.size.unwrap_or(10),
        }
        .normalized();

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped)),
            );
        }

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("查询用户总数失败"))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("查询用户列表失败"))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 列出某院系某年级的全部学生
    pub async fn list_students_in_cohort_impl(
        &self,
        department_id: i64,
        year: i32,
    ) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(Column::Role.eq(UserRole::STUDENT))
            .filter(Column::DepartmentId.eq(department_id))
            .filter(Column::Year.eq(year))
            .all(&self.db)
            .await
            .map_err(db_error("查询院系学生失败"))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新用户信息
    pub async fn update_user_impl(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        if Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询用户失败"))?
            .is_none()
        {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(first_name) = changes.first_name {
            model.first_name = Set(first_name);
        }

        if let Some(last_name) = changes.last_name {
            model.last_name = Set(last_name);
        }

        if let Some(username) = changes.username {
            model.username = Set(username);
        }

        if let Some(password_hash) = changes.password_hash {
            model.password_hash = Set(password_hash);
        }

        // 角色、院系与年级作为一个整体写入
        if let Some(placement) = changes.placement {
            model.role = Set(placement.role().to_string());
            model.department_id = Set(placement.department_id());
            model.year = Set(placement.year());
        }

        let updated = model.update(&self.db).await.map_err(db_error("更新用户失败"))?;

        Ok(Some(updated.into_user()))
    }

    /// 删除用户（事务内级联）
    pub async fn delete_user_cascade_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;
        let deleted = cascade::delete_user(&txn, id).await?;
        txn.commit().await.map_err(db_error("提交事务失败"))?;
        Ok(deleted)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(db_error("统计用户数量失败"))?;

        Ok(count)
    }
}
