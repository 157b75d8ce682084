//! 级联删除
//!
//! 外键不带 ON DELETE 动作，依赖关系在这里按固定顺序显式删除。
//! 调用方负责开启并提交事务，这里的函数只接收事务连接。

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};

use super::db_error;
use crate::entity::{
    assignment_submissions, assignments, course_students, courses, departments, exam_attempts,
    exams, lectures, users,
};
use crate::errors::Result;

/// 删除若干作业的全部提交
pub(super) async fn delete_submissions_of_assignments<C: ConnectionTrait>(
    conn: &C,
    assignment_ids: &[i64],
) -> Result<u64> {
    if assignment_ids.is_empty() {
        return Ok(0);
    }
    let result = assignment_submissions::Entity::delete_many()
        .filter(assignment_submissions::Column::AssignmentId.is_in(assignment_ids.iter().copied()))
        .exec(conn)
        .await
        .map_err(db_error("删除作业提交失败"))?;
    Ok(result.rows_affected)
}

/// 删除考试及其答卷
pub(super) async fn delete_exam<C: ConnectionTrait>(conn: &C, exam_id: i64) -> Result<bool> {
    exam_attempts::Entity::delete_many()
        .filter(exam_attempts::Column::ExamId.eq(exam_id))
        .exec(conn)
        .await
        .map_err(db_error("删除考试答卷失败"))?;

    let result = exams::Entity::delete_by_id(exam_id)
        .exec(conn)
        .await
        .map_err(db_error("删除考试失败"))?;
    Ok(result.rows_affected > 0)
}

/// 删除作业及其提交
pub(super) async fn delete_assignment<C: ConnectionTrait>(
    conn: &C,
    assignment_id: i64,
) -> Result<bool> {
    delete_submissions_of_assignments(conn, &[assignment_id]).await?;

    let result = assignments::Entity::delete_by_id(assignment_id)
        .exec(conn)
        .await
        .map_err(db_error("删除作业失败"))?;
    Ok(result.rows_affected > 0)
}

/// 删除课程：答卷 → 考试 → 提交 → 作业 → 课时 → 名单 → 课程
pub(super) async fn delete_course<C: ConnectionTrait>(conn: &C, course_id: i64) -> Result<bool> {
    let exam_ids: Vec<i64> = exams::Entity::find()
        .select_only()
        .column(exams::Column::Id)
        .filter(exams::Column::CourseId.eq(course_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_error("查询课程考试失败"))?;

    exam_attempts::Entity::delete_many()
        .filter(
            sea_orm::Condition::any()
                .add(exam_attempts::Column::CourseId.eq(course_id))
                .add(exam_attempts::Column::ExamId.is_in(exam_ids.iter().copied())),
        )
        .exec(conn)
        .await
        .map_err(db_error("删除课程答卷失败"))?;

    exams::Entity::delete_many()
        .filter(exams::Column::CourseId.eq(course_id))
        .exec(conn)
        .await
        .map_err(db_error("删除课程考试失败"))?;

    let assignment_ids: Vec<i64> = assignments::Entity::find()
        .select_only()
        .column(assignments::Column::Id)
        .filter(assignments::Column::CourseId.eq(course_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_error("查询课程作业失败"))?;

    delete_submissions_of_assignments(conn, &assignment_ids).await?;

    assignments::Entity::delete_many()
        .filter(assignments::Column::CourseId.eq(course_id))
        .exec(conn)
        .await
        .map_err(db_error("删除课程作业失败"))?;

    lectures::Entity::delete_many()
        .filter(lectures::Column::CourseId.eq(course_id))
        .exec(conn)
        .await
        .map_err(db_error("删除课时失败"))?;

    course_students::Entity::delete_many()
        .filter(course_students::Column::CourseId.eq(course_id))
        .exec(conn)
        .await
        .map_err(db_error("删除课程名单失败"))?;

    let result = courses::Entity::delete_by_id(course_id)
        .exec(conn)
        .await
        .map_err(db_error("删除课程失败"))?;
    Ok(result.rows_affected > 0)
}

/// 删除用户：名单 → 答卷 → 提交 → 任教课程置空 → 用户
pub(super) async fn delete_user<C: ConnectionTrait>(conn: &C, user_id: i64) -> Result<bool> {
    course_students::Entity::delete_many()
        .filter(course_students::Column::UserId.eq(user_id))
        .exec(conn)
        .await
        .map_err(db_error("删除用户选课记录失败"))?;

    exam_attempts::Entity::delete_many()
        .filter(exam_attempts::Column::UserId.eq(user_id))
        .exec(conn)
        .await
        .map_err(db_error("删除用户答卷失败"))?;

    assignment_submissions::Entity::delete_many()
        .filter(assignment_submissions::Column::StudentId.eq(user_id))
        .exec(conn)
        .await
        .map_err(db_error("删除用户作业提交失败"))?;

    courses::Entity::update_many()
        .col_expr(
            courses::Column::ProfessorId,
            Expr::value(Option::<i64>::None),
        )
        .filter(courses::Column::ProfessorId.eq(user_id))
        .exec(conn)
        .await
        .map_err(db_error("解除课程教师失败"))?;

    let result = users::Entity::delete_by_id(user_id)
        .exec(conn)
        .await
        .map_err(db_error("删除用户失败"))?;
    Ok(result.rows_affected > 0)
}

/// 删除院系：先删其课程，再删其用户，最后删院系本身
pub(super) async fn delete_department<C: ConnectionTrait>(
    conn: &C,
    department_id: i64,
) -> Result<bool> {
    let course_ids: Vec<i64> = courses::Entity::find()
        .select_only()
        .column(courses::Column::Id)
        .filter(courses::Column::DepartmentId.eq(department_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_error("查询院系课程失败"))?;

    for course_id in course_ids {
        delete_course(conn, course_id).await?;
    }

    let user_ids: Vec<i64> = users::Entity::find()
        .select_only()
        .column(users::Column::Id)
        .filter(users::Column::DepartmentId.eq(department_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_error("查询院系用户失败"))?;

    for user_id in user_ids {
        delete_user(conn, user_id).await?;
    }

    let result = departments::Entity::delete_by_id(department_id)
        .exec(conn)
        .await
        .map_err(db_error("删除院系失败"))?;
    Ok(result.rows_affected > 0)
}
