use super::{SeaOrmStorage, db_error};
use crate::entity::exam_attempts::{ActiveModel, Column, Entity as ExamAttempts};
use crate::errors::Result;
use crate::models::attempts::{
    entities::{AttemptAnswer, ExamAttempt, GradingStatus},
    requests::NewAttempt,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 保存答卷；(user, exam) 唯一索引冲突时返回 Conflict
    pub async fn create_attempt_impl(&self, attempt: NewAttempt) -> Result<ExamAttempt> {
        let submitted_at = attempt.submitted_at.timestamp();

        let model = ActiveModel {
            exam_id: Set(attempt.exam_id),
            user_id: Set(attempt.user_id),
            course_id: Set(attempt.course_id),
            answers: Set(serde_json::to_string(&attempt.answers)?),
            total_score: Set(attempt.total_score),
            grading_status: Set(attempt.grading_status.to_string()),
            submitted_at: Set(submitted_at),
            updated_at: Set(submitted_at),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("保存答卷失败"))?;

        result.into_attempt()
    }

    pub async fn get_attempt_by_id_impl(&self, id: i64) -> Result<Option<ExamAttempt>> {
        ExamAttempts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询答卷失败"))?
            .map(|m| m.into_attempt())
            .transpose()
    }

    pub async fn get_attempt_by_user_and_exam_impl(
        &self,
        user_id: i64,
        exam_id: i64,
    ) -> Result<Option<ExamAttempt>> {
        ExamAttempts::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::ExamId.eq(exam_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询答卷失败"))?
            .map(|m| m.into_attempt())
            .transpose()
    }

    pub async fn list_attempts_by_exam_impl(&self, exam_id: i64) -> Result<Vec<ExamAttempt>> {
        ExamAttempts::find()
            .filter(Column::ExamId.eq(exam_id))
            .order_by_desc(Column::TotalScore)
            .order_by_asc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(db_error("查询答卷列表失败"))?
            .into_iter()
            .map(|m| m.into_attempt())
            .collect()
    }

    pub async fn list_attempted_exam_ids_impl(
        &self,
        user_id: i64,
        exam_ids: &[i64],
    ) -> Result<Vec<i64>> {
        if exam_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = ExamAttempts::find()
            .select_only()
            .column(Column::ExamId)
            .filter(Column::UserId.eq(user_id))
            .filter(Column::ExamId.is_in(exam_ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("查询作答记录失败"))?;

        Ok(ids)
    }

    pub async fn update_attempt_grading_impl(
        &self,
        id: i64,
        answers: Vec<AttemptAnswer>,
        total_score: f64,
        grading_status: GradingStatus,
    ) -> Result<Option<ExamAttempt>> {
        if ExamAttempts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询答卷失败"))?
            .is_none()
        {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            answers: Set(serde_json::to_string(&answers)?),
            total_score: Set(total_score),
            grading_status: Set(grading_status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新答卷批改结果失败"))?;

        updated.into_attempt().map(Some)
    }
}
