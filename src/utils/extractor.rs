//! 路径参数提取器
//!
//! 非法的路径参数在进入处理程序之前就以统一的 `ApiResponse` 拒绝。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};

static STORED_FILE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,128}\.[A-Za-z0-9]{1,10}$").expect("Invalid file name regex")
});

fn bad_request(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

fn parse_positive_i64(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req
        .match_info()
        .get(param)
        .ok_or_else(|| bad_request(format!("Missing path parameter: {param}")))?;

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_request(format!("Invalid {param}: {raw}"))),
    }
}

macro_rules! define_safe_i64_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_i64(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_i64_extractor! {
    SafeIDI64 => "id",
    SafeLectureIdI64 => "lecture_id",
}

/// 上传目录中的文件名（只允许服务端生成的 `<uuid>.<ext>` 形式，排除路径穿越）
#[derive(Debug, Clone)]
pub struct SafeFileName(pub String);

impl FromRequest for SafeFileName {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let name = req.match_info().get("file_name").unwrap_or_default();
        ready(if STORED_FILE_NAME_RE.is_match(name) {
            Ok(SafeFileName(name.to_string()))
        } else {
            Err(bad_request(format!("Invalid file name: {name}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_file_name_pattern() {
        assert!(STORED_FILE_NAME_RE.is_match("0b6f7c1e-8d2a-4a5b-9c3d-1e2f3a4b5c6d.pdf"));
        assert!(!STORED_FILE_NAME_RE.is_match("../etc/passwd"));
        assert!(!STORED_FILE_NAME_RE.is_match("a/b.pdf"));
        assert!(!STORED_FILE_NAME_RE.is_match("noext"));
    }
}
