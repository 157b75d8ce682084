//! 自动选课规则
//!
//! 学生与课程按 (院系, 年级) 匹配。规则只增不减：学生换院系或年级后，
//! 原有名单记录保留，名单只会随实体删除而消失。

use tracing::debug;

use crate::errors::Result;
use crate::models::courses::entities::Course;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 学生创建或更新后：加入所有 (院系, 年级) 相同的课程
pub async fn enroll_student(storage: &dyn Storage, user: &User) -> Result<u64> {
    let Some((department_id, year)) = user.cohort() else {
        return Ok(0);
    };

    let mut added = 0;
    for course in storage.list_courses_in_cohort(department_id, year).await? {
        added += storage.add_course_students(course.id, &[user.id]).await?;
    }

    if added > 0 {
        debug!("Auto-enrolled user {} into {} course(s)", user.id, added);
    }
    Ok(added)
}

/// 课程创建或更新后：加入所有 (院系, 年级) 相同的学生
pub async fn enroll_cohort(storage: &dyn Storage, course: &Course) -> Result<u64> {
    let student_ids: Vec<i64> = storage
        .list_students_in_cohort(course.department_id, course.year)
        .await?
        .iter()
        .map(|student| student.id)
        .collect();

    let added = storage.add_course_students(course.id, &student_ids).await?;
    if added > 0 {
        debug!("Auto-enrolled {} student(s) into course {}", added, course.id);
    }
    Ok(added)
}

/// 学生能否访问课程内容：在名单中，或 (院系, 年级) 与课程一致
pub async fn can_access_course(
    storage: &dyn Storage,
    student: &User,
    course: &Course,
) -> Result<bool> {
    if student.cohort() == Some((course.department_id, course.year)) {
        return Ok(true);
    }
    storage.is_course_student(course.id, student.id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserPlacement, UserRole};
    use crate::models::users::requests::UserChanges;
    use crate::storage::testing::*;

    #[tokio::test]
    async fn test_student_enrolled_on_create_and_update() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let math = department(&storage, "Math").await;
        let os = course(&storage, "OS", None, cs.id, 2).await;
        let algebra = course(&storage, "Algebra", None, math.id, 3).await;

        let student = user(&storage, "s1", UserRole::Student, Some(cs.id), Some(2)).await;
        assert_eq!(enroll_student(storage.as_ref(), &student).await.unwrap(), 1);
        assert!(storage.is_course_student(os.id, student.id).await.unwrap());
        // 幂等
        assert_eq!(enroll_student(storage.as_ref(), &student).await.unwrap(), 0);

        // 换到 Math 三年级：加入新课程，旧名单不移除
        let moved = storage
            .update_user(
                student.id,
                UserChanges {
                    placement: Some(UserPlacement::new(UserRole::Student, Some(math.id), Some(3))),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        enroll_student(storage.as_ref(), &moved).await.unwrap();
        assert!(storage.is_course_student(algebra.id, student.id).await.unwrap());
        assert!(storage.is_course_student(os.id, student.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_non_student_is_never_enrolled() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let os = course(&storage, "OS", None, cs.id, 2).await;
        let prof = user(&storage, "p1", UserRole::Professor, Some(cs.id), Some(2)).await;

        assert_eq!(enroll_student(storage.as_ref(), &prof).await.unwrap(), 0);
        assert!(storage.list_course_student_ids(os.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_course_creation_enrolls_existing_students() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let s1 = user(&storage, "s1", UserRole::Student, Some(cs.id), Some(2)).await;
        let s2 = user(&storage, "s2", UserRole::Student, Some(cs.id), Some(2)).await;
        let other_year = user(&storage, "s3", UserRole::Student, Some(cs.id), Some(3)).await;

        let os = course(&storage, "OS", None, cs.id, 2).await;
        assert_eq!(enroll_cohort(storage.as_ref(), &os).await.unwrap(), 2);

        let mut ids = storage.list_course_student_ids(os.id).await.unwrap();
        ids.sort();
        assert_eq!(ids, vec![s1.id, s2.id]);
        assert!(!ids.contains(&other_year.id));
    }

    #[tokio::test]
    async fn test_access_by_roster_or_cohort() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let os = course(&storage, "OS", None, cs.id, 2).await;
        let matching = user(&storage, "s1", UserRole::Student, Some(cs.id), Some(2)).await;
        let rostered = user(&storage, "s2", UserRole::Student, Some(cs.id), Some(4)).await;
        let outsider = user(&storage, "s3", UserRole::Student, None, None).await;
        storage.add_course_students(os.id, &[rostered.id]).await.unwrap();

        assert!(can_access_course(storage.as_ref(), &matching, &os).await.unwrap());
        assert!(can_access_course(storage.as_ref(), &rostered, &os).await.unwrap());
        assert!(!can_access_course(storage.as_ref(), &outsider, &os).await.unwrap());
    }
}
