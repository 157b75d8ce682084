//! 考试实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// 题目列表（JSON）
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub duration: i32,
    pub start_date: i64,
    pub end_date: i64,
    #[sea_orm(column_type = "Double")]
    pub total_points: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::exam_attempts::Entity")]
    ExamAttempts,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::exam_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamAttempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(self) -> crate::errors::Result<crate::models::exams::entities::Exam> {
        use super::from_timestamp;
        let questions = serde_json::from_str(&self.questions)?;
        Ok(crate::models::exams::entities::Exam {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            questions,
            duration: self.duration,
            start_date: from_timestamp(self.start_date),
            end_date: from_timestamp(self.end_date),
            total_points: self.total_points,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        })
    }
}
