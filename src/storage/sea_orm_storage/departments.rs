use super::{SeaOrmStorage, cascade, db_error};
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::errors::Result;
use crate::models::departments::entities::Department;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set, TransactionTrait};

impl SeaOrmStorage {
    pub async fn create_department_impl(&self, name: &str) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建院系失败"))?;

        Ok(result.into_department())
    }

    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询院系失败"))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 按名称排序列出院系
    pub async fn list_departments_impl(&self) -> Result<Vec<Department>> {
        let departments = Departments::find()
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询院系列表失败"))?;

        Ok(departments
            .into_iter()
            .map(|m| m.into_department())
            .collect())
    }

    pub async fn update_department_impl(&self, id: i64, name: &str) -> Result<Option<Department>> {
        if self.get_department_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新院系失败"))?;

        Ok(Some(updated.into_department()))
    }

    /// 删除院系及其全部课程和用户
    pub async fn delete_department_cascade_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;
        let deleted = cascade::delete_department(&txn, id).await?;
        txn.commit().await.map_err(db_error("提交事务失败"))?;
        Ok(deleted)
    }
}
