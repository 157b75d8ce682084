//! 上传文件的读取

use actix_web::{HttpResponse, Result as ActixResult, http::header};
use std::path::Path;

use crate::errors::EduPortalError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::upload::disk_path;

pub struct FileService;

fn content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "txt" | "md" => "text/plain; charset=utf-8",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

impl FileService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// `file_name` 已由 `SafeFileName` 校验，不含路径分隔符
    pub async fn serve_upload(&self, file_name: &str) -> ActixResult<HttpResponse> {
        let path = disk_path(file_name);
        if !path.is_file() {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }

        let body = match std::fs::read(&path) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("{}", EduPortalError::from(e));
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "File read failed",
                    )),
                );
            }
        };

        Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, content_type(file_name)))
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{file_name}\""),
            ))
            .body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("a.PDF"), "application/pdf");
        assert_eq!(content_type("b.jpeg"), "image/jpeg");
        assert_eq!(content_type("c.bin"), "application/octet-stream");
    }
}
