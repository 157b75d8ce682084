use super::{SeaOrmStorage, cascade, db_error};
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::Result;
use crate::models::exams::{
    entities::Exam,
    requests::{ExamChanges, NewExam},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_exam_impl(&self, exam: NewExam) -> Result<Exam> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(exam.course_id),
            title: Set(exam.title),
            description: Set(exam.description),
            questions: Set(serde_json::to_string(&exam.questions)?),
            duration: Set(exam.duration),
            start_date: Set(exam.start_date.timestamp()),
            end_date: Set(exam.end_date.timestamp()),
            total_points: Set(exam.total_points),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建考试失败"))?;

        result.into_exam()
    }

    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<Exam>> {
        Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询考试失败"))?
            .map(|m| m.into_exam())
            .transpose()
    }

    pub async fn list_exams_by_courses_impl(&self, course_ids: &[i64]) -> Result<Vec<Exam>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        Exams::find()
            .filter(Column::CourseId.is_in(course_ids.iter().copied()))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询考试列表失败"))?
            .into_iter()
            .map(|m| m.into_exam())
            .collect()
    }

    pub async fn update_exam_impl(&self, id: i64, changes: ExamChanges) -> Result<Option<Exam>> {
        if Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询考试失败"))?
            .is_none()
        {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            title: Set(changes.title),
            description: Set(changes.description),
            duration: Set(changes.duration),
            start_date: Set(changes.start_date.timestamp()),
            end_date: Set(changes.end_date.timestamp()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新考试失败"))?;

        updated.into_exam().map(Some)
    }

    /// 删除考试及其答卷
    pub async fn delete_exam_cascade_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;
        let deleted = cascade::delete_exam(&txn, id).await?;
        txn.commit().await.map_err(db_error("提交事务失败"))?;
        Ok(deleted)
    }
}
