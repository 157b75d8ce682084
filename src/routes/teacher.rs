use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attempts::requests::GradeAttemptRequest;
use crate::models::exams::requests::{CreateExamRequest, UpdateExamRequest};
use crate::models::lectures::requests::{CreateLectureRequest, UpdateLectureRequest};
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::users::entities::UserRole;
use crate::services::{AssignmentService, CourseService, ExamService, LectureService};
use crate::utils::{SafeIDI64, SafeLectureIdI64};

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static LECTURE_SERVICE: Lazy<LectureService> = Lazy::new(LectureService::new_lazy);
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 课程与课时
pub async fn list_own_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_own_courses(&req).await
}

pub async fn add_lecture(
    req: HttpRequest,
    course_id: SafeIDI64,
    data: web::Json<CreateLectureRequest>,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .add_lecture(course_id.0, data.into_inner(), &req)
        .await
}

pub async fn update_lecture(
    req: HttpRequest,
    course_id: SafeIDI64,
    lecture_id: SafeLectureIdI64,
    data: web::Json<UpdateLectureRequest>,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .update_lecture(course_id.0, lecture_id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_lecture(
    req: HttpRequest,
    course_id: SafeIDI64,
    lecture_id: SafeLectureIdI64,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .delete_lecture(course_id.0, lecture_id.0, &req)
        .await
}

// 考试
pub async fn list_exams(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req).await
}

pub async fn create_exam(
    req: HttpRequest,
    data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(data.into_inner(), &req).await
}

pub async fn get_exam(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(exam_id.0, &req).await
}

pub async fn update_exam(
    req: HttpRequest,
    exam_id: SafeIDI64,
    data: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam(exam_id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_exam(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(exam_id.0, &req).await
}

pub async fn get_exam_grades(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam_grades(exam_id.0, &req).await
}

pub async fn get_attempt_detail(
    req: HttpRequest,
    attempt_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_attempt_detail(attempt_id.0, &req).await
}

pub async fn grade_exam_attempt(
    req: HttpRequest,
    attempt_id: SafeIDI64,
    data: web::Json<GradeAttemptRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .grade_exam_attempt(attempt_id.0, data.into_inner(), &req)
        .await
}

// 作业
pub async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(&req).await
}

pub async fn create_assignment(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.create_assignment(payload, &req).await
}

pub async fn update_assignment(
    req: HttpRequest,
    assignment_id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(assignment_id.0, payload, &req)
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    assignment_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(assignment_id.0, &req)
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    assignment_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_submissions(assignment_id.0, &req)
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
    data: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .grade_submission(submission_id.0, data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles()))
                    .route("/courses", web::get().to(list_own_courses))
                    .route("/courses/{id}/lectures", web::post().to(add_lecture))
                    .route(
                        "/courses/{id}/lectures/{lecture_id}",
                        web::put().to(update_lecture),
                    )
                    .route(
                        "/courses/{id}/lectures/{lecture_id}",
                        web::delete().to(delete_lecture),
                    )
                    .route("/exams", web::get().to(list_exams))
                    .route("/exams", web::post().to(create_exam))
                    .route("/exams/{id}", web::get().to(get_exam))
                    .route("/exams/{id}", web::put().to(update_exam))
                    .route("/exams/{id}", web::delete().to(delete_exam))
                    .route("/exams/{id}/grades", web::get().to(get_exam_grades))
                    .route("/exam-attempts/{id}", web::get().to(get_attempt_detail))
                    .route("/exam-attempts/{id}/grade", web::put().to(grade_exam_attempt))
                    .route("/assignments", web::get().to(list_assignments))
                    .route("/assignments", web::post().to(create_assignment))
                    .route("/assignments/{id}", web::put().to(update_assignment))
                    .route("/assignments/{id}", web::delete().to(delete_assignment))
                    .route(
                        "/assignments/{id}/submissions",
                        web::get().to(list_submissions),
                    )
                    .route(
                        "/assignments/submissions/{id}/grade",
                        web::post().to(grade_submission),
                    ),
            ),
    );
}
