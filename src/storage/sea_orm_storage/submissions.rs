use super::{SeaOrmStorage, db_error};
use crate::entity::assignment_submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::Result;
use crate::models::submissions::entities::AssignmentSubmission;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 保存作业提交；(assignment, student) 唯一索引冲突时返回 Conflict
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_path: &str,
        submitted_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<AssignmentSubmission> {
        let ts = submitted_at.timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            file_path: Set(file_path.to_string()),
            score: Set(None),
            max_score: Set(None),
            feedback: Set(None),
            graded: Set(false),
            submitted_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("保存作业提交失败"))?;

        Ok(result.into_submission())
    }

    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<AssignmentSubmission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询作业提交失败"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssignmentSubmission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询作业提交失败"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn list_submissions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentSubmission>> {
        let models = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询作业提交列表失败"))?;

        Ok(models.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn list_submissions_by_student_impl(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<AssignmentSubmission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_error("查询学生作业提交失败"))?;

        Ok(models.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn grade_submission_impl(
        &self,
        id: i64,
        score: f64,
        max_score: f64,
        feedback: Option<String>,
    ) -> Result<Option<AssignmentSubmission>> {
        if Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询作业提交失败"))?
            .is_none()
        {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            score: Set(Some(score)),
            max_score: Set(Some(max_score)),
            feedback: Set(feedback),
            graded: Set(true),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("批改作业失败"))?;

        Ok(Some(updated.into_submission()))
    }
}
