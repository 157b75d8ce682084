use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}._-]+$").expect("Invalid username regex"));

static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)https?://[^\s/$.?#][^\s]*$").expect("Invalid url regex"));

const MAX_NAME_LENGTH: usize = 64;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 64
    let len = username.chars().count();
    if !(3..=64).contains(&len) {
        return Err("Username length must be between 3 and 64 characters");
    }
    // 用户名格式校验：字母、数字、点、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

/// 姓名校验：去掉首尾空白后非空且不超过上限
pub fn validate_person_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("First name and last name are required");
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err("Name must be at most 64 characters");
    }
    Ok(())
}

/// 课时视频地址必须是 http(s) URL
pub fn validate_http_url(url: &str) -> Result<(), &'static str> {
    if !HTTP_URL_RE.is_match(url.trim()) {
        return Err("YouTube URL must be a valid http(s) URL");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：至少 8 个字符，且同时包含字母和数字。
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_alphabetic()) {
        errors.push("Password must contain at least one letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("secret12").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_letter() {
        let result = validate_password("12345678");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("abcdefgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("jane.doe.1234").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("jane doe").is_err());
    }

    #[test]
    fn test_http_url() {
        assert!(validate_http_url("https://www.youtube.com/watch?v=abc").is_ok());
        assert!(validate_http_url("http://youtu.be/abc").is_ok());
        assert!(validate_http_url("ftp://youtube.com/abc").is_err());
        assert!(validate_http_url("youtube.com/abc").is_err());
    }

    #[test]
    fn test_person_name() {
        assert!(validate_person_name("  Ada ").is_ok());
        assert!(validate_person_name("   ").is_err());
    }
}
