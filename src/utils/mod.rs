pub mod extractor;
pub mod file_magic;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod upload;
pub mod username;
pub mod validate;

pub use extractor::{SafeFileName, SafeIDI64, SafeLectureIdI64};
pub use file_magic::validate_magic_bytes;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::path_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
