use crate::errors::Result;
use crate::models::courses::entities::Course;
use crate::models::courses::responses::{CourseView, CourseViewList};
use crate::models::users::entities::User;
use crate::models::users::responses::UserSummary;
use crate::storage::Storage;

/// 组装课程详情：教师、院系、学生名单与课时
pub async fn build_course_view(storage: &dyn Storage, course: Course) -> Result<CourseView> {
    let professor = match course.professor_id {
        Some(professor_id) => storage
            .get_user_by_id(professor_id)
            .await?
            .map(|user| UserSummary::from(&user)),
        None => None,
    };
    let department = storage.get_department_by_id(course.department_id).await?;

    let student_ids = storage.list_course_student_ids(course.id).await?;
    let students = storage
        .get_users_by_ids(&student_ids)
        .await?
        .iter()
        .map(UserSummary::from)
        .collect();
    let lectures = storage.list_lectures_by_course(course.id).await?;

    Ok(CourseView {
        course,
        professor,
        department,
        students,
        lectures,
    })
}

pub async fn build_course_views(
    storage: &dyn Storage,
    courses: Vec<Course>,
) -> Result<Vec<CourseView>> {
    let mut views = Vec::with_capacity(courses.len());
    for course in courses {
        views.push(build_course_view(storage, course).await?);
    }
    Ok(views)
}

/// 教师任教的课程
pub async fn list_own_courses(storage: &dyn Storage, professor: &User) -> Result<CourseViewList> {
    let courses = storage.list_courses_by_professor(professor.id).await?;
    Ok(CourseViewList {
        items: build_course_views(storage, courses).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::testing::*;

    #[tokio::test]
    async fn test_course_view_includes_roster_and_professor() {
        let storage = memory_storage().await;
        let cs = department(&storage, "CS").await;
        let prof = user(&storage, "prof", UserRole::Professor, Some(cs.id), None).await;
        let other_prof = user(&storage, "other", UserRole::Professor, Some(cs.id), None).await;
        let student = user(&storage, "stud", UserRole::Student, Some(cs.id), Some(1)).await;
        let os = course(&storage, "OS", Some(prof.id), cs.id, 1).await;
        course(&storage, "DB", Some(other_prof.id), cs.id, 1).await;
        storage.add_course_students(os.id, &[student.id]).await.unwrap();

        let own = list_own_courses(storage.as_ref(), &prof).await.unwrap();
        assert_eq!(own.items.len(), 1);
        let view = &own.items[0];
        assert_eq!(view.course.id, os.id);
        assert_eq!(view.professor.as_ref().map(|p| p.id), Some(prof.id));
        assert_eq!(view.department.as_ref().map(|d| d.name.as_str()), Some("CS"));
        assert_eq!(view.students.len(), 1);
        assert_eq!(view.students[0].username, "stud");
    }
}
