//! 预导入模块，方便使用

pub use super::assignment_submissions::{
    ActiveModel as AssignmentSubmissionActiveModel, Entity as AssignmentSubmissions,
    Model as AssignmentSubmissionModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::course_students::{
    ActiveModel as CourseStudentActiveModel, Entity as CourseStudents, Model as CourseStudentModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::departments::{
    ActiveModel as DepartmentActiveModel, Entity as Departments, Model as DepartmentModel,
};
pub use super::exam_attempts::{
    ActiveModel as ExamAttemptActiveModel, Entity as ExamAttempts, Model as ExamAttemptModel,
};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams, Model as ExamModel};
pub use super::lectures::{
    ActiveModel as LectureActiveModel, Entity as Lectures, Model as LectureModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
