use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attempts::requests::SubmitExamRequest;
use crate::models::users::entities::UserRole;
use crate::services::StudentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_courses(&req).await
}

pub async fn get_course_lectures(
    req: HttpRequest,
    course_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_course_lectures(course_id.0, &req).await
}

pub async fn get_course_exams(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_course_exams(course_id.0, &req).await
}

pub async fn get_course_assignments(
    req: HttpRequest,
    course_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_course_assignments(course_id.0, &req).await
}

pub async fn submit_exam(
    req: HttpRequest,
    exam_id: SafeIDI64,
    data: web::Json<SubmitExamRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .submit_exam(exam_id.0, data.into_inner(), &req)
        .await
}

pub async fn get_exam_attempt(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_exam_attempt(exam_id.0, &req).await
}

pub async fn submit_assignment(
    req: HttpRequest,
    assignment_id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .submit_assignment(assignment_id.0, payload, &req)
        .await
}

pub async fn get_own_submission(
    req: HttpRequest,
    assignment_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .get_own_submission(assignment_id.0, &req)
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
                    .route("/courses", web::get().to(list_courses))
                    .route("/courses/{id}/lectures", web::get().to(get_course_lectures))
                    .route("/courses/{id}/exams", web::get().to(get_course_exams))
                    .route(
                        "/courses/{id}/assignments",
                        web::get().to(get_course_assignments),
                    )
                    .route("/exams/{id}/submit", web::post().to(submit_exam))
                    .route("/exams/{id}/attempt", web::get().to(get_exam_attempt))
                    .route(
                        "/assignments/{id}/submit",
                        web::post().to(submit_assignment),
                    )
                    .route(
                        "/assignments/{id}/submission",
                        web::get().to(get_own_submission),
                    ),
            ),
    );
}
