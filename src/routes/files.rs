use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::FileService;
use crate::utils::SafeFileName;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn serve_upload(file_name: SafeFileName) -> ActixResult<HttpResponse> {
    FILE_SERVICE.serve_upload(&file_name.0).await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/uploads/{file_name}", web::get().to(serve_upload));
}
