//! 用户名生成：`名.姓.NNNN`

use rand::Rng;

use crate::errors::{EduPortalError, Result};
use crate::storage::Storage;

const MAX_ATTEMPTS: usize = 20;

/// 用户名前缀：小写并去掉全部空白
pub fn username_base(first_name: &str, last_name: &str) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    };
    format!("{}.{}", clean(first_name), clean(last_name))
}

/// 生成一个尚未被占用的用户名，重试次数有上限
pub async fn generate_username(
    storage: &dyn Storage,
    first_name: &str,
    last_name: &str,
) -> Result<String> {
    let base = username_base(first_name, last_name);

    for _ in 0..MAX_ATTEMPTS {
        let suffix: u16 = rand::rng().random_range(1000..=9999);
        let candidate = format!("{base}.{suffix}");
        if storage.get_user_by_username(&candidate).await?.is_none() {
            return Ok(candidate);
        }
    }

    Err(EduPortalError::conflict(format!(
        "Could not generate a unique username for {base}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::memory_storage;

    #[test]
    fn test_username_base() {
        assert_eq!(username_base(" Mary Ann", "Van Der Berg "), "maryann.vanderberg");
    }

    #[tokio::test]
    async fn test_generated_username_format() {
        let storage = memory_storage().await;
        let username = generate_username(storage.as_ref(), "Ada", "Lovelace").await.unwrap();
        let (base, suffix) = username.rsplit_once('.').unwrap();
        assert_eq!(base, "ada.lovelace");
        let suffix: u16 = suffix.parse().unwrap();
        assert!((1000..=9999).contains(&suffix));
    }
}
