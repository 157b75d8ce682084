//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod attempts;
mod cascade;
mod courses;
mod departments;
mod exams;
mod lectures;
mod submissions;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{EduPortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

/// 将数据库错误转换为业务错误：唯一约束冲突映射为 Conflict，其他附带上下文
pub(crate) fn db_error(context: &str) -> impl Fn(DbErr) -> EduPortalError + '_ {
    move |err| match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
            EduPortalError::conflict(format!("{context}: {detail}"))
        }
        _ => EduPortalError::database_operation(format!("{context}: {err}")),
    }
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 直连指定 URL 并运行迁移（单连接，供测试和内存数据库使用）
    pub async fn connect(url: &str) -> Result<Self> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| EduPortalError::database_connection(format!("无法连接到数据库: {e}")))?;

        Self::migrate(&db).await?;
        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| EduPortalError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EduPortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EduPortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| EduPortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EduPortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    PaginationInfo, PaginationQuery,
    assignments::{entities::Assignment, requests::AssignmentRecord},
    attempts::{
        entities::{AttemptAnswer, ExamAttempt, GradingStatus},
        requests::NewAttempt,
    },
    courses::{entities::Course, requests::CourseRequest},
    departments::entities::Department,
    exams::{
        entities::Exam,
        requests::{ExamChanges, NewExam},
    },
    lectures::{
        entities::Lecture,
        requests::{CreateLectureRequest, UpdateLectureRequest},
    },
    submissions::entities::AssignmentSubmission,
    users::{
        entities::User,
        requests::{NewUser, UserChanges, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn list_students_in_cohort(&self, department_id: i64, year: i32) -> Result<Vec<User>> {
        self.list_students_in_cohort_impl(department_id, year).await
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        self.update_user_impl(id, changes).await
    }

    async fn delete_user_cascade(&self, id: i64) -> Result<bool> {
        self.delete_user_cascade_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 院系模块
    async fn create_department(&self, name: &str) -> Result<Department> {
        self.create_department_impl(name).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        self.list_departments_impl().await
    }

    async fn update_department(&self, id: i64, name: &str) -> Result<Option<Department>> {
        self.update_department_impl(id, name).await
    }

    async fn delete_department_cascade(&self, id: i64) -> Result<bool> {
        self.delete_department_cascade_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, course: CourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<(Vec<Course>, PaginationInfo)> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn list_courses_by_professor(&self, professor_id: i64) -> Result<Vec<Course>> {
        self.list_courses_by_professor_impl(professor_id).await
    }

    async fn list_courses_in_cohort(&self, department_id: i64, year: i32) -> Result<Vec<Course>> {
        self.list_courses_in_cohort_impl(department_id, year).await
    }

    async fn update_course(&self, id: i64, course: CourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, course).await
    }

    async fn delete_course_cascade(&self, id: i64) -> Result<bool> {
        self.delete_course_cascade_impl(id).await
    }

    async fn list_course_student_ids(&self, course_id: i64) -> Result<Vec<i64>> {
        self.list_course_student_ids_impl(course_id).await
    }

    async fn is_course_student(&self, course_id: i64, user_id: i64) -> Result<bool> {
        self.is_course_student_impl(course_id, user_id).await
    }

    async fn add_course_students(&self, course_id: i64, user_ids: &[i64]) -> Result<u64> {
        self.add_course_students_impl(course_id, user_ids).await
    }

    // 课时模块
    async fn create_lecture(
        &self,
        course_id: i64,
        lecture: CreateLectureRequest,
    ) -> Result<Lecture> {
        self.create_lecture_impl(course_id, lecture).await
    }

    async fn get_lecture_by_id(&self, id: i64) -> Result<Option<Lecture>> {
        self.get_lecture_by_id_impl(id).await
    }

    async fn list_lectures_by_course(&self, course_id: i64) -> Result<Vec<Lecture>> {
        self.list_lectures_by_course_impl(course_id).await
    }

    async fn update_lecture(
        &self,
        id: i64,
        update: UpdateLectureRequest,
    ) -> Result<Option<Lecture>> {
        self.update_lecture_impl(id, update).await
    }

    async fn delete_lecture(&self, id: i64) -> Result<bool> {
        self.delete_lecture_impl(id).await
    }

    // 考试模块
    async fn create_exam(&self, exam: NewExam) -> Result<Exam> {
        self.create_exam_impl(exam).await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn list_exams_by_courses(&self, course_ids: &[i64]) -> Result<Vec<Exam>> {
        self.list_exams_by_courses_impl(course_ids).await
    }

    async fn update_exam(&self, id: i64, changes: ExamChanges) -> Result<Option<Exam>> {
        self.update_exam_impl(id, changes).await
    }

    async fn delete_exam_cascade(&self, id: i64) -> Result<bool> {
        self.delete_exam_cascade_impl(id).await
    }

    // 答卷模块
    async fn create_attempt(&self, attempt: NewAttempt) -> Result<ExamAttempt> {
        self.create_attempt_impl(attempt).await
    }

    async fn get_attempt_by_id(&self, id: i64) -> Result<Option<ExamAttempt>> {
        self.get_attempt_by_id_impl(id).await
    }

    async fn get_attempt_by_user_and_exam(
        &self,
        user_id: i64,
        exam_id: i64,
    ) -> Result<Option<ExamAttempt>> {
        self.get_attempt_by_user_and_exam_impl(user_id, exam_id).await
    }

    async fn list_attempts_by_exam(&self, exam_id: i64) -> Result<Vec<ExamAttempt>> {
        self.list_attempts_by_exam_impl(exam_id).await
    }

    async fn list_attempted_exam_ids(&self, user_id: i64, exam_ids: &[i64]) -> Result<Vec<i64>> {
        self.list_attempted_exam_ids_impl(user_id, exam_ids).await
    }

    async fn update_attempt_grading(
        &self,
        id: i64,
        answers: Vec<AttemptAnswer>,
        total_score: f64,
        grading_status: GradingStatus,
    ) -> Result<Option<ExamAttempt>> {
        self.update_attempt_grading_impl(id, answers, total_score, grading_status)
            .await
    }

    // 作业模块
    async fn create_assignment(&self, record: AssignmentRecord) -> Result<Assignment> {
        self.create_assignment_impl(record).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_by_courses(&self, course_ids: &[i64]) -> Result<Vec<Assignment>> {
        self.list_assignments_by_courses_impl(course_ids).await
    }

    async fn update_assignment_cascade(
        &self,
        id: i64,
        record: AssignmentRecord,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_cascade_impl(id, record).await
    }

    async fn delete_assignment_cascade(&self, id: i64) -> Result<bool> {
        self.delete_assignment_cascade_impl(id).await
    }

    // 作业提交模块
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_path: &str,
        submitted_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<AssignmentSubmission> {
        self.create_submission_impl(assignment_id, student_id, file_path, submitted_at)
            .await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<AssignmentSubmission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssignmentSubmission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentSubmission>> {
        self.list_submissions_by_assignment_impl(assignment_id).await
    }

    async fn list_submissions_by_student(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<AssignmentSubmission>> {
        self.list_submissions_by_student_impl(student_id, assignment_ids)
            .await
    }

    async fn grade_submission(
        &self,
        id: i64,
        score: f64,
        max_score: f64,
        feedback: Option<String>,
    ) -> Result<Option<AssignmentSubmission>> {
        self.grade_submission_impl(id, score, max_score, feedback)
            .await
    }
}
