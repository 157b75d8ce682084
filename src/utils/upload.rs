//! multipart 表单读取
//!
//! 文本字段收集到 map，至多一个文件字段写入上传目录，落盘文件名为 `<uuid>.<ext>`。

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use futures_util::TryStreamExt;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::EduPortalError;
use crate::models::ErrorCode;
use crate::utils::validate_magic_bytes;

const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// 已落盘的上传文件
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub stored_name: String,
    pub original_name: String,
    /// 对外访问路径，形如 `/uploads/<stored_name>`
    pub public_path: String,
    pub size: usize,
}

impl StoredFile {
    /// 业务失败时清理已写入的文件
    pub fn discard(&self) {
        let path = disk_path(&self.stored_name);
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!("Failed to remove upload {}: {}", path.display(), e);
        }
    }
}

#[derive(Debug, Default)]
pub struct MultipartData {
    pub fields: HashMap<String, String>,
    pub file: Option<StoredFile>,
}

impl MultipartData {
    pub fn take_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }
}

/// 上传被拒绝：携带业务错误码与 HTTP 状态
#[derive(Debug)]
pub struct UploadRejection {
    pub code: ErrorCode,
    pub status: StatusCode,
    pub message: String,
}

impl UploadRejection {
    fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(err: EduPortalError) -> Self {
        tracing::error!("{}", err);
        Self {
            code: ErrorCode::FileUploadFailed,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Failed to store uploaded file".to_string(),
        }
    }
}

/// 上传文件在磁盘上的位置
pub fn disk_path(stored_name: &str) -> PathBuf {
    Path::new(&AppConfig::get().upload.dir).join(stored_name)
}

fn file_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

/// 读取 multipart 请求
///
/// `file_field` 指定文件字段名；`allowed_types` 为 None 时使用配置中的扩展名白名单。
pub async fn read_multipart(
    mut payload: Multipart,
    file_field: &str,
    allowed_types: Option<&[&str]>,
) -> Result<MultipartData, UploadRejection> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;

    let mut data = MultipartData::default();

    while let Some(mut field) = payload.try_next().await.map_err(|e| {
        UploadRejection::bad_request(
            ErrorCode::BadRequest,
            format!("Invalid multipart payload: {e}"),
        )
    })? {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let filename = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        if name != file_field || filename.is_none() {
            // 文本字段
            let mut buf = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(|e| {
                UploadRejection::bad_request(
                    ErrorCode::BadRequest,
                    format!("Invalid field data: {e}"),
                )
            })? {
                if buf.len() + chunk.len() > MAX_TEXT_FIELD_SIZE {
                    return Err(UploadRejection::bad_request(
                        ErrorCode::BadRequest,
                        format!("Field '{name}' is too large"),
                    ));
                }
                buf.extend_from_slice(&chunk);
            }
            let value = String::from_utf8(buf).map_err(|_| {
                UploadRejection::bad_request(
                    ErrorCode::BadRequest,
                    format!("Field '{name}' is not valid UTF-8"),
                )
            })?;
            data.fields.insert(name, value);
            continue;
        }

        if data.file.is_some() {
            if let Some(file) = data.file.take() {
                file.discard();
            }
            return Err(UploadRejection::bad_request(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }

        let original_name = filename.unwrap_or_default();
        let extension = file_extension(&original_name);
        let allowed = match allowed_types {
            Some(types) => types.iter().any(|t| t.eq_ignore_ascii_case(&extension)),
            None => config
                .upload
                .allowed_types
                .iter()
                .any(|t| t.trim_start_matches('.').eq_ignore_ascii_case(&extension)),
        };
        if extension.is_empty() || !allowed {
            return Err(UploadRejection::bad_request(
                ErrorCode::FileTypeNotAllowed,
                "File type not allowed",
            ));
        }

        // 确保上传目录存在
        if !Path::new(upload_dir).exists() {
            fs::create_dir_all(upload_dir).map_err(|e| {
                UploadRejection::internal(EduPortalError::file_operation(format!("{e}")))
            })?;
        }

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = disk_path(&stored_name);
        let mut f = File::create(&path).map_err(|e| {
            UploadRejection::internal(EduPortalError::file_operation(format!("{e}")))
        })?;

        let stored = StoredFile {
            public_path: format!("/uploads/{stored_name}"),
            stored_name,
            original_name,
            size: 0,
        };

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        loop {
            let chunk = match field.try_next().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    stored.discard();
                    return Err(UploadRejection::bad_request(
                        ErrorCode::FileUploadFailed,
                        format!("Upload interrupted: {e}"),
                    ));
                }
            };

            // 第一个 chunk 时验证魔术字节
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&chunk, &extension) {
                    stored.discard();
                    return Err(UploadRejection::bad_request(
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    ));
                }
            }

            total_size += chunk.len();
            // 校验大小
            if total_size > max_size {
                stored.discard();
                return Err(UploadRejection::bad_request(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                ));
            }
            if let Err(e) = f.write_all(&chunk) {
                stored.discard();
                return Err(UploadRejection::internal(EduPortalError::from(e)));
            }
        }

        if total_size == 0 {
            stored.discard();
            return Err(UploadRejection::bad_request(
                ErrorCode::FileUploadFailed,
                "Uploaded file is empty",
            ));
        }

        data.file = Some(StoredFile {
            size: total_size,
            ..stored
        });
    }

    Ok(data)
}
