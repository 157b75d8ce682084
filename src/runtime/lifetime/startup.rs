use crate::config::{AppConfig, SeedConfig};
use crate::errors::Result;
use crate::models::users::entities::{UserPlacement, UserRole};
use crate::models::users::requests::NewUser;
use crate::services::enrollment::enroll_student;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码，保证同时含字母和数字
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    let mut password: String = (0..length.saturating_sub(2))
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect();
    password.push(CHARSET[rng.random_range(0..26)] as char);
    password.push(CHARSET[rng.random_range(52..CHARSET.len())] as char);
    password
}

/// 写入初始数据：默认院系、管理员，以及可选的演示教师和二年级学生
///
/// 只在数据库中没有任何用户时执行，返回是否进行了写入。
pub async fn seed_initial_data(
    storage: &dyn Storage,
    seed: &SeedConfig,
    password: &str,
) -> Result<bool> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!("Database already has {} user(s), skipping seed", count);
        return Ok(false);
    }
    info!("No users found in database, creating initial data...");

    let existing = storage
        .list_departments()
        .await?
        .into_iter()
        .find(|department| department.name == seed.department_name);
    let department = match existing {
        Some(department) => department,
        None => storage.create_department(&seed.department_name).await?,
    };

    let password_hash = hash_password(password)?;
    let account = |first: &str, last: &str, username: &str, placement| NewUser {
        first_name: first.to_string(),
        last_name: last.to_string(),
        username: username.to_string(),
        password_hash: password_hash.clone(),
        placement,
    };

    let admin = storage
        .create_user(account(
            "System",
            "Administrator",
            &seed.admin_username,
            UserPlacement::new(UserRole::Admin, Some(department.id), None),
        ))
        .await?;
    info!(
        "Default admin account created (ID: {}, username: {})",
        admin.id, admin.username
    );

    if seed.demo_accounts {
        storage
            .create_user(account(
                "Demo",
                "Professor",
                "demo.professor",
                UserPlacement::new(UserRole::Professor, Some(department.id), None),
            ))
            .await?;
        let student = storage
            .create_user(account(
                "Demo",
                "Student",
                "demo.student",
                UserPlacement::new(UserRole::Student, Some(department.id), Some(2)),
            ))
            .await?;
        enroll_student(storage, &student).await?;
        info!("Demo professor and student accounts created");
    }

    Ok(true)
}

/// 初始化默认账号
async fn seed(storage: &Arc<dyn Storage>) {
    let config = AppConfig::get();
    if !config.seed.enabled {
        debug!("Seeding disabled by configuration");
        return;
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    if let Err(e) = seed_initial_data(storage.as_ref(), &config.seed, &password).await {
        warn!("Failed to seed initial data: {}", e);
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认账号（如果需要）
    seed(&storage).await;

    StartupContext { storage }
}
