use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[cfg(test)]
pub mod testing;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 分页列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 列出某院系某年级的学生
    async fn list_students_in_cohort(&self, department_id: i64, year: i32) -> Result<Vec<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>>;
    // 删除用户及其名单、答卷、作业提交；其任教课程的教师置空
    async fn delete_user_cascade(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 院系管理方法
    async fn create_department(&self, name: &str) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    async fn list_departments(&self) -> Result<Vec<Department>>;
    async fn update_department(&self, id: i64, name: &str) -> Result<Option<Department>>;
    // 删除院系及其全部课程和用户
    async fn delete_department_cascade(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    async fn create_course(&self, course: CourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<(Vec<Course>, PaginationInfo)>;
    // 列出某教师任教的课程
    async fn list_courses_by_professor(&self, professor_id: i64) -> Result<Vec<Course>>;
    // 列出与 (院系, 年级) 匹配的课程，新课程在前
    async fn list_courses_in_cohort(&self, department_id: i64, year: i32) -> Result<Vec<Course>>;
    async fn update_course(&self, id: i64, course: CourseRequest) -> Result<Option<Course>>;
    // 删除课程及其课时、名单、考试、答卷、作业与提交
    async fn delete_course_cascade(&self, id: i64) -> Result<bool>;

    /// 课程名单方法
    async fn list_course_student_ids(&self, course_id: i64) -> Result<Vec<i64>>;
    async fn is_course_student(&self, course_id: i64, user_id: i64) -> Result<bool>;
    // 加入名单，已存在的记录跳过，返回新增数量
    async fn add_course_students(&self, course_id: i64, user_ids: &[i64]) -> Result<u64>;

    /// 课时方法
    async fn create_lecture(&self, course_id: i64, lecture: CreateLectureRequest)
    -> Result<Lecture>;
    async fn get_lecture_by_id(&self, id: i64) -> Result<Option<Lecture>>;
    async fn list_lectures_by_course(&self, course_id: i64) -> Result<Vec<Lecture>>;
    async fn update_lecture(&self, id: i64, update: UpdateLectureRequest)
    -> Result<Option<Lecture>>;
    async fn delete_lecture(&self, id: i64) -> Result<bool>;

    /// 考试方法
    async fn create_exam(&self, exam: NewExam) -> Result<Exam>;
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    async fn list_exams_by_courses(&self, course_ids: &[i64]) -> Result<Vec<Exam>>;
    async fn update_exam(&self, id: i64, changes: ExamChanges) -> Result<Option<Exam>>;
    // 删除考试及其答卷
    async fn delete_exam_cascade(&self, id: i64) -> Result<bool>;

    /// 答卷方法
    async fn create_attempt(&self, attempt: NewAttempt) -> Result<ExamAttempt>;
    async fn get_attempt_by_id(&self, id: i64) -> Result<Option<ExamAttempt>>;
    async fn get_attempt_by_user_and_exam(
        &self,
        user_id: i64,
        exam_id: i64,
    ) -> Result<Option<ExamAttempt>>;
    async fn list_attempts_by_exam(&self, exam_id: i64) -> Result<Vec<ExamAttempt>>;
    // 用户已作答的考试 ID
    async fn list_attempted_exam_ids(&self, user_id: i64, exam_ids: &[i64]) -> Result<Vec<i64>>;
    async fn update_attempt_grading(
        &self,
        id: i64,
        answers: Vec<AttemptAnswer>,
        total_score: f64,
        grading_status: GradingStatus,
    ) -> Result<Option<ExamAttempt>>;

    /// 作业方法
    async fn create_assignment(&self, record: AssignmentRecord) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_by_courses(&self, course_ids: &[i64]) -> Result<Vec<Assignment>>;
    // 更新作业并清空其全部提交
    async fn update_assignment_cascade(
        &self,
        id: i64,
        record: AssignmentRecord,
    ) -> Result<Option<Assignment>>;
    // 删除作业及其提交
    async fn delete_assignment_cascade(&self, id: i64) -> Result<bool>;

    /// 作业提交方法
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_path: &str,
        submitted_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<AssignmentSubmission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<AssignmentSubmission>>;
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssignmentSubmission>>;
    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentSubmission>>;
    async fn list_submissions_by_student(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<AssignmentSubmission>>;
    async fn grade_submission(
        &self,
        id: i64,
        score: f64,
        max_score: f64,
        feedback: Option<String>,
    ) -> Result<Option<AssignmentSubmission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
