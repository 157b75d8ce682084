use super::{SeaOrmStorage, cascade, db_error};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::Result;
use crate::models::assignments::{
    entities::{Assignment, AttachedFile},
    requests::AssignmentRecord,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 将附件写入 ActiveModel 的四个附件列
fn set_pdf(model: &mut ActiveModel, pdf: AttachedFile) {
    model.pdf_filename = Set(Some(pdf.filename));
    model.pdf_original_name = Set(Some(pdf.original_name));
    model.pdf_path = Set(Some(pdf.path));
    model.pdf_uploaded_at = Set(Some(pdf.uploaded_at.timestamp()));
}

impl SeaOrmStorage {
    pub async fn create_assignment_impl(&self, record: AssignmentRecord) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let fields = record.fields;

        let mut model = ActiveModel {
            course_id: Set(fields.course_id),
            title: Set(fields.title),
            description: Set(fields.description),
            due_date: Set(fields.due_date.timestamp()),
            max_score: Set(fields.max_score),
            pdf_filename: Set(None),
            pdf_original_name: Set(None),
            pdf_path: Set(None),
            pdf_uploaded_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(pdf) = record.pdf {
            set_pdf(&mut model, pdf);
        }

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建作业失败"))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询作业失败"))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_by_courses_impl(
        &self,
        course_ids: &[i64],
    ) -> Result<Vec<Assignment>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Assignments::find()
            .filter(Column::CourseId.is_in(course_ids.iter().copied()))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询作业列表失败"))?;

        Ok(models.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 更新作业；已有提交按旧要求完成，全部清除
    pub async fn update_assignment_cascade_impl(
        &self,
        id: i64,
        record: AssignmentRecord,
    ) -> Result<Option<Assignment>> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        if Assignments::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error("查询作业失败"))?
            .is_none()
        {
            return Ok(None);
        }

        cascade::delete_submissions_of_assignments(&txn, &[id]).await?;

        let fields = record.fields;
        let mut model = ActiveModel {
            id: Set(id),
            course_id: Set(fields.course_id),
            title: Set(fields.title),
            description: Set(fields.description),
            due_date: Set(fields.due_date.timestamp()),
            max_score: Set(fields.max_score),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(pdf) = record.pdf {
            set_pdf(&mut model, pdf);
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(db_error("更新作业失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok(Some(updated.into_assignment()))
    }

    pub async fn delete_assignment_cascade_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;
        let deleted = cascade::delete_assignment(&txn, id).await?;
        txn.commit().await.map_err(db_error("提交事务失败"))?;
        Ok(deleted)
    }
}
