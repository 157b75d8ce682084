//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub due_date: i64,
    #[sea_orm(column_type = "Double")]
    pub max_score: f64,
    pub pdf_filename: Option<String>,
    pub pdf_original_name: Option<String>,
    pub pdf_path: Option<String>,
    pub pdf_uploaded_at: Option<i64>,
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
    #[sea_orm(has_many = "super::assignment_submissions::Entity")]
    AssignmentSubmissions,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::assignment_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignmentSubmissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use super::from_timestamp;
        use crate::models::assignments::entities::{Assignment, AttachedFile};

        // 附件四列要么同时存在，要么同时为空
        let pdf = match (
            self.pdf_filename,
            self.pdf_original_name,
            self.pdf_path,
            self.pdf_uploaded_at,
        ) {
            (Some(filename), Some(original_name), Some(path), Some(uploaded_at)) => {
                Some(AttachedFile {
                    filename,
                    original_name,
                    path,
                    uploaded_at: from_timestamp(uploaded_at),
                })
            }
            _ => None,
        };

        Assignment {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            due_date: from_timestamp(self.due_date),
            max_score: self.max_score,
            pdf,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
