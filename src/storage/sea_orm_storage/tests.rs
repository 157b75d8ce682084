use crate::errors::EduPortalError;
use crate::models::assignments::{
    entities::AttachedFile,
    requests::{AssignmentFields, AssignmentRecord},
};
use crate::models::attempts::{
    entities::{AttemptAnswer, GradingStatus},
    requests::NewAttempt,
};
use crate::models::users::entities::{UserPlacement, UserRole};
use crate::models::users::requests::{NewUser, UserChanges};
use crate::storage::Storage;
use crate::storage::testing::*;
use std::sync::Arc;

fn record(course_id: i64, title: &str) -> AssignmentRecord {
    AssignmentRecord {
        fields: AssignmentFields {
            course_id,
            title: title.to_string(),
            description: None,
            due_date: at("2026-05-01T12:00:00Z"),
            max_score: 100.0,
        },
        pdf: None,
    }
}

fn attempt(exam_id: i64, user_id: i64, course_id: i64) -> NewAttempt {
    NewAttempt {
        exam_id,
        user_id,
        course_id,
        answers: vec![AttemptAnswer {
            answer: "B".to_string(),
            score: 2.0,
            is_correct: Some(true),
            manually_graded: false,
        }],
        total_score: 2.0,
        grading_status: GradingStatus::FullyGraded,
        submitted_at: at("2026-03-01T10:00:00Z"),
    }
}

async fn count_rows(storage: &Arc<dyn Storage>, course_id: i64) -> (usize, usize, usize) {
    let exams = storage.list_exams_by_courses(&[course_id]).await.unwrap();
    let assignments = storage.list_assignments_by_courses(&[course_id]).await.unwrap();
    let lectures = storage.list_lectures_by_course(course_id).await.unwrap();
    (exams.len(), assignments.len(), lectures.len())
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let storage = memory_storage().await;
    user(&storage, "dup", UserRole::Student, None, None).await;

    let err = storage
        .create_user(NewUser {
            first_name: "Other".to_string(),
            last_name: "User".to_string(),
            username: "dup".to_string(),
            password_hash: "x".to_string(),
            placement: UserPlacement::new(UserRole::Professor, None, None),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EduPortalError::Conflict(_)));
}

#[tokio::test]
async fn test_placement_update_clears_year_for_professor() {
    let storage = memory_storage().await;
    let dept = department(&storage, "Physics").await;
    let student = user(&storage, "s1", UserRole::Student, Some(dept.id), Some(2)).await;

    let updated = storage
        .update_user(
            student.id,
            UserChanges {
                placement: Some(UserPlacement::new(UserRole::Professor, Some(dept.id), Some(2))),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.role, UserRole::Professor);
    assert_eq!(updated.year, None);
}

#[tokio::test]
async fn test_add_course_students_skips_existing() {
    let storage = memory_storage().await;
    let dept = department(&storage, "Math").await;
    let s1 = user(&storage, "s1", UserRole::Student, Some(dept.id), Some(1)).await;
    let s2 = user(&storage, "s2", UserRole::Student, Some(dept.id), Some(1)).await;
    let course = course(&storage, "Algebra", None, dept.id, 1).await;

    assert_eq!(storage.add_course_students(course.id, &[s1.id]).await.unwrap(), 1);
    assert_eq!(
        storage
            .add_course_students(course.id, &[s1.id, s2.id, s2.id])
            .await
            .unwrap(),
        1
    );
    let mut ids = storage.list_course_student_ids(course.id).await.unwrap();
    ids.sort();
    assert_eq!(ids, vec![s1.id, s2.id]);
}

#[tokio::test]
async fn test_second_attempt_is_conflict() {
    let storage = memory_storage().await;
    let dept = department(&storage, "CS").await;
    let student = user(&storage, "s1", UserRole::Student, Some(dept.id), Some(2)).await;
    let course = course(&storage, "OS", None, dept.id, 2).await;
    let exam = exam(
        &storage,
        course.id,
        at("2026-03-01T00:00:00Z"),
        at("2026-03-02T00:00:00Z"),
    )
    .await;

    storage
        .create_attempt(attempt(exam.id, student.id, course.id))
        .await
        .unwrap();
    let err = storage
        .create_attempt(attempt(exam.id, student.id, course.id))
        .await
        .unwrap_err();
    assert!(matches!(err, EduPortalError::Conflict(_)));
}

#[tokio::test]
async fn test_exam_delete_removes_attempts() {
    let storage = memory_storage().await;
    let dept = department(&storage, "CS").await;
    let student = user(&storage, "s1", UserRole::Student, Some(dept.id), Some(2)).await;
    let course = course(&storage, "OS", None, dept.id, 2).await;
    let exam = exam(
        &storage,
        course.id,
        at("2026-03-01T00:00:00Z"),
        at("2026-03-02T00:00:00Z"),
    )
    .await;
    let saved = storage
        .create_attempt(attempt(exam.id, student.id, course.id))
        .await
        .unwrap();

    assert!(storage.delete_exam_cascade(exam.id).await.unwrap());
    assert!(storage.get_exam_by_id(exam.id).await.unwrap().is_none());
    assert!(storage.get_attempt_by_id(saved.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_assignment_update_and_delete_remove_submissions() {
    let storage = memory_storage().await;
    let dept = department(&storage, "CS").await;
    let s1 = user(&storage, "s1", UserRole::Student, Some(dept.id), Some(2)).await;
    let course = course(&storage, "OS", None, dept.id, 2).await;
    let assignment = storage
        .create_assignment(AssignmentRecord {
            pdf: Some(AttachedFile {
                filename: "a.pdf".to_string(),
                original_name: "brief.pdf".to_string(),
                path: "/uploads/a.pdf".to_string(),
                uploaded_at: at("2026-04-01T00:00:00Z"),
            }),
            ..record(course.id, "Lab 1")
        })
        .await
        .unwrap();

    let first = storage
        .create_submission(assignment.id, s1.id, "/uploads/s1.pdf", at("2026-04-02T00:00:00Z"))
        .await
        .unwrap();

    // 更新作业：提交被清空，未提供新附件时保留原附件
    let updated = storage
        .update_assignment_cascade(assignment.id, record(course.id, "Lab 1 (revised)"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Lab 1 (revised)");
    assert_eq!(updated.pdf.map(|p| p.original_name).as_deref(), Some("brief.pdf"));
    assert!(storage.get_submission_by_id(first.id).await.unwrap().is_none());

    let second = storage
        .create_submission(assignment.id, s1.id, "/uploads/s1b.pdf", at("2026-04-03T00:00:00Z"))
        .await
        .unwrap();
    assert!(storage.delete_assignment_cascade(assignment.id).await.unwrap());
    assert!(storage.get_submission_by_id(second.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_second_submission_is_conflict() {
    let storage = memory_storage().await;
    let dept = department(&storage, "CS").await;
    let s1 = user(&storage, "s1", UserRole::Student, Some(dept.id), Some(2)).await;
    let course = course(&storage, "OS", None, dept.id, 2).await;
    let assignment = storage.create_assignment(record(course.id, "Lab")).await.unwrap();

    storage
        .create_submission(assignment.id, s1.id, "/uploads/1.pdf", at("2026-04-02T00:00:00Z"))
        .await
        .unwrap();
    let err = storage
        .create_submission(assignment.id, s1.id, "/uploads/2.pdf", at("2026-04-02T00:00:01Z"))
        .await
        .unwrap_err();
    assert!(matches!(err, EduPortalError::Conflict(_)));
}

#[tokio::test]
async fn test_user_delete_unsets_professor_and_removes_work() {
    let storage = memory_storage().await;
    let dept = department(&storage, "CS").await;
    let prof = user(&storage, "p1", UserRole::Professor, Some(dept.id), None).await;
    let student = user(&storage, "s1", UserRole::Student, Some(dept.id), Some(2)).await;
    let course = course(&storage, "OS", Some(prof.id), dept.id, 2).await;
    storage.add_course_students(course.id, &[student.id]).await.unwrap();
    let exam = exam(
        &storage,
        course.id,
        at("2026-03-01T00:00:00Z"),
        at("2026-03-02T00:00:00Z"),
    )
    .await;
    storage
        .create_attempt(attempt(exam.id, student.id, course.id))
        .await
        .unwrap();

    assert!(storage.delete_user_cascade(student.id).await.unwrap());
    assert!(storage.list_course_student_ids(course.id).await.unwrap().is_empty());
    assert!(storage.list_attempts_by_exam(exam.id).await.unwrap().is_empty());

    assert!(storage.delete_user_cascade(prof.id).await.unwrap());
    let course = storage.get_course_by_id(course.id).await.unwrap().unwrap();
    assert_eq!(course.professor_id, None);
}

#[tokio::test]
async fn test_department_delete_leaves_no_orphans() {
    let storage = memory_storage().await;
    let dept = department(&storage, "CS").await;
    let other = department(&storage, "Math").await;
    let prof = user(&storage, "p1", UserRole::Professor, Some(dept.id), None).await;
    let student = user(&storage, "s1", UserRole::Student, Some(dept.id), Some(2)).await;
    let outsider = user(&storage, "s2", UserRole::Student, Some(other.id), Some(2)).await;
    let cs_course = course(&storage, "OS", Some(prof.id), dept.id, 2).await;
    let math_course = course(&storage, "Algebra", None, other.id, 2).await;
    storage.add_course_students(cs_course.id, &[student.id]).await.unwrap();

    let exam = exam(
        &storage,
        cs_course.id,
        at("2026-03-01T00:00:00Z"),
        at("2026-03-02T00:00:00Z"),
    )
    .await;
    storage
        .create_attempt(attempt(exam.id, student.id, cs_course.id))
        .await
        .unwrap();
    let assignment = storage.create_assignment(record(cs_course.id, "Lab")).await.unwrap();
    storage
        .create_submission(assignment.id, student.id, "/uploads/1.pdf", at("2026-04-02T00:00:00Z"))
        .await
        .unwrap();

    assert!(storage.delete_department_cascade(dept.id).await.unwrap());

    assert!(storage.get_department_by_id(dept.id).await.unwrap().is_none());
    assert!(storage.get_course_by_id(cs_course.id).await.unwrap().is_none());
    assert!(storage.get_user_by_id(prof.id).await.unwrap().is_none());
    assert!(storage.get_user_by_id(student.id).await.unwrap().is_none());
    assert_eq!(count_rows(&storage, cs_course.id).await, (0, 0, 0));
    assert!(storage.get_exam_by_id(exam.id).await.unwrap().is_none());

    // 其他院系不受影响
    assert!(storage.get_user_by_id(outsider.id).await.unwrap().is_some());
    assert!(storage.get_course_by_id(math_course.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_attempt_grading_round_trip() {
    let storage = memory_storage().await;
    let dept = department(&storage, "CS").await;
    let student = user(&storage, "s1", UserRole::Student, Some(dept.id), Some(2)).await;
    let course = course(&storage, "OS", None, dept.id, 2).await;
    let exam = exam(
        &storage,
        course.id,
        at("2026-03-01T00:00:00Z"),
        at("2026-03-02T00:00:00Z"),
    )
    .await;
    assert_eq!(exam.total_points, 5.0);
    assert_eq!(exam.questions.len(), 2);

    let saved = storage
        .create_attempt(attempt(exam.id, student.id, course.id))
        .await
        .unwrap();
    let attempted = storage
        .list_attempted_exam_ids(student.id, &[exam.id, exam.id + 100])
        .await
        .unwrap();
    assert_eq!(attempted, vec![exam.id]);

    let mut answers = saved.answers.clone();
    answers[0].score = 1.5;
    answers[0].manually_graded = true;
    let graded = storage
        .update_attempt_grading(saved.id, answers, 1.5, GradingStatus::FullyGraded)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(graded.total_score, 1.5);
    assert!(graded.answers[0].manually_graded);
    assert_eq!(graded.grading_status, GradingStatus::FullyGraded);
}
