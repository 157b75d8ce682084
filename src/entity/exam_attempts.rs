//! 考试答卷实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_id: i64,
    pub user_id: i64,
    pub course_id: i64,
    /// 作答列表（JSON），与题目一一对应
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    #[sea_orm(column_type = "Double")]
    pub total_score: f64,
    pub grading_status: String,
    pub submitted_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exams::Entity",
        from = "Column::ExamId",
        to = "super::exams::Column::Id"
    )]
    Exam,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attempt(
        self,
    ) -> crate::errors::Result<crate::models::attempts::entities::ExamAttempt> {
        use super::from_timestamp;
        use crate::models::attempts::entities::{ExamAttempt, GradingStatus};

        let answers = serde_json::from_str(&self.answers)?;
        Ok(ExamAttempt {
            id: self.id,
            exam_id: self.exam_id,
            user_id: self.user_id,
            course_id: self.course_id,
            answers,
            total_score: self.total_score,
            grading_status: self
                .grading_status
                .parse::<GradingStatus>()
                .unwrap_or(GradingStatus::Ungraded),
            submitted_at: from_timestamp(self.submitted_at),
            updated_at: from_timestamp(self.updated_at),
        })
    }
}
