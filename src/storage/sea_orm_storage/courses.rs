use super::{SeaOrmStorage, cascade, db_error};
use crate::entity::course_students;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::Result;
use crate::models::{
    PaginationInfo, PaginationQuery,
    courses::{entities::Course, requests::CourseRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, course: CourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(course.name),
            professor_id: Set(course.professor_id),
            department_id: Set(course.department_id),
            year: Set(course.year),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建课程失败"))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询课程失败"))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn list_courses_with_pagination_impl(
        &self,
        query: PaginationQuery,
    ) -> Result<(Vec<Course>, PaginationInfo)> {
        let (page, size) = query.normalized();

        let paginator = Courses::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("查询课程总数失败"))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("查询课程列表失败"))?;

        Ok((
            courses.into_iter().map(|m| m.into_course()).collect(),
            PaginationInfo::new(page, size, total),
        ))
    }

    pub async fn list_courses_by_professor_impl(&self, professor_id: i64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .filter(Column::ProfessorId.eq(professor_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询教师课程失败"))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    pub async fn list_courses_in_cohort_impl(
        &self,
        department_id: i64,
        year: i32,
    ) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .filter(Column::DepartmentId.eq(department_id))
            .filter(Column::Year.eq(year))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询院系课程失败"))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    pub async fn update_course_impl(
        &self,
        id: i64,
        course: CourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(course.name),
            professor_id: Set(course.professor_id),
            department_id: Set(course.department_id),
            year: Set(course.year),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新课程失败"))?;

        Ok(Some(updated.into_course()))
    }

    pub async fn delete_course_cascade_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;
        let deleted = cascade::delete_course(&txn, id).await?;
        txn.commit().await.map_err(db_error("提交事务失败"))?;
        Ok(deleted)
    }

    /// 课程名单中的学生 ID，按加入顺序
    pub async fn list_course_student_ids_impl(&self, course_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = course_students::Entity::find()
            .select_only()
            .column(course_students::Column::UserId)
            .filter(course_students::Column::CourseId.eq(course_id))
            .order_by_asc(course_students::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("查询课程名单失败"))?;

        Ok(ids)
    }

    pub async fn is_course_student_impl(&self, course_id: i64, user_id: i64) -> Result<bool> {
        let count = course_students::Entity::find()
            .filter(course_students::Column::CourseId.eq(course_id))
            .filter(course_students::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(db_error("查询课程名单失败"))?;

        Ok(count > 0)
    }

    /// 把学生加入名单，已在名单中的跳过
    pub async fn add_course_students_impl(&self, course_id: i64, user_ids: &[i64]) -> Result<u64> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let existing = self.list_course_student_ids_impl(course_id).await?;
        let mut pending: Vec<i64> = user_ids
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect();
        pending.sort_unstable();
        pending.dedup();

        let now = chrono::Utc::now().timestamp();
        let mut added = 0;
        for user_id in pending {
            let model = course_students::ActiveModel {
                course_id: Set(course_id),
                user_id: Set(user_id),
                enrolled_at: Set(now),
                ..Default::default()
            };
            match model.insert(&self.db).await {
                Ok(_) => added += 1,
                // 并发写入已加入的同一记录，唯一索引拒绝即视为已存在
                Err(e)
                    if matches!(
                        e.sql_err(),
                        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
                    ) => {}
                Err(e) => return Err(db_error("加入课程名单失败")(e)),
            }
        }

        Ok(added)
    }
}
