//! 测试夹具：内存 SQLite 存储与常用实体的快捷构造

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::Storage;
use super::sea_orm_storage::SeaOrmStorage;
use crate::models::{
    courses::{entities::Course, requests::CourseRequest},
    departments::entities::Department,
    exams::{
        entities::{Exam, Question, QuestionKind},
        requests::NewExam,
    },
    users::{
        entities::{User, UserPlacement, UserRole},
        requests::NewUser,
    },
};

pub async fn memory_storage() -> Arc<dyn Storage> {
    Arc::new(
        SeaOrmStorage::connect("sqlite::memory:")
            .await
            .expect("内存数据库初始化失败"),
    )
}

pub async fn department(storage: &Arc<dyn Storage>, name: &str) -> Department {
    storage.create_department(name).await.unwrap()
}

pub async fn user(
    storage: &Arc<dyn Storage>,
    username: &str,
    role: UserRole,
    department_id: Option<i64>,
    year: Option<i32>,
) -> User {
    storage
        .create_user(NewUser {
            first_name: username.to_string(),
            last_name: "Test".to_string(),
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            placement: UserPlacement::new(role, department_id, year),
        })
        .await
        .unwrap()
}

pub async fn course(
    storage: &Arc<dyn Storage>,
    name: &str,
    professor_id: Option<i64>,
    department_id: i64,
    year: i32,
) -> Course {
    storage
        .create_course(CourseRequest {
            name: name.to_string(),
            professor_id,
            department_id,
            year,
        })
        .await
        .unwrap()
}

/// 一道单选题（正确答案 "B"，2 分）和一道照片作答题（3 分）
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question {
            text: "Pick B".to_string(),
            points: 2.0,
            kind: QuestionKind::MultipleChoice {
                options: vec!["A".to_string(), "B".to_string()],
                correct_answer: "B".to_string(),
            },
        },
        Question {
            text: "Draw it".to_string(),
            points: 3.0,
            kind: QuestionKind::PhotoAnswer,
        },
    ]
}

pub async fn exam(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Exam {
    let questions = sample_questions();
    let total_points = questions.iter().map(|q| q.points).sum();
    storage
        .create_exam(NewExam {
            course_id,
            title: "Midterm".to_string(),
            description: None,
            questions,
            duration: 60,
            start_date,
            end_date,
            total_points,
        })
        .await
        .unwrap()
}

/// 解析 RFC 3339 时间，测试里书写更直观
pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}
