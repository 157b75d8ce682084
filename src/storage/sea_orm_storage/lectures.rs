use super::{SeaOrmStorage, db_error};
use crate::entity::lectures::{ActiveModel, Column, Entity as Lectures};
use crate::errors::Result;
use crate::models::lectures::{
    entities::Lecture,
    requests::{CreateLectureRequest, UpdateLectureRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 新增课时，未指定顺序时排在末尾
    pub async fn create_lecture_impl(
        &self,
        course_id: i64,
        lecture: CreateLectureRequest,
    ) -> Result<Lecture> {
        let order = match lecture.order {
            Some(order) => order,
            None => Lectures::find()
                .filter(Column::CourseId.eq(course_id))
                .count(&self.db)
                .await
                .map_err(db_error("统计课时数量失败"))? as i32,
        };

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            course_id: Set(course_id),
            title: Set(lecture.title),
            description: Set(lecture.description),
            youtube_url: Set(lecture.youtube_url),
            lecture_order: Set(order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建课时失败"))?;

        Ok(result.into_lecture())
    }

    pub async fn get_lecture_by_id_impl(&self, id: i64) -> Result<Option<Lecture>> {
        let result = Lectures::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询课时失败"))?;

        Ok(result.map(|m| m.into_lecture()))
    }

    pub async fn list_lectures_by_course_impl(&self, course_id: i64) -> Result<Vec<Lecture>> {
        let lectures = Lectures::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::LectureOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询课时列表失败"))?;

        Ok(lectures.into_iter().map(|m| m.into_lecture()).collect())
    }

    pub async fn update_lecture_impl(
        &self,
        id: i64,
        update: UpdateLectureRequest,
    ) -> Result<Option<Lecture>> {
        if self.get_lecture_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(youtube_url) = update.youtube_url {
            model.youtube_url = Set(youtube_url);
        }

        if let Some(order) = update.order {
            model.lecture_order = Set(order);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新课时失败"))?;

        Ok(Some(updated.into_lecture()))
    }

    pub async fn delete_lecture_impl(&self, id: i64) -> Result<bool> {
        let result = Lectures::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("删除课时失败"))?;

        Ok(result.rows_affected > 0)
    }
}
