pub mod admin;

pub mod auth;

pub mod files;

pub mod student;

pub mod system;

pub mod teacher;

pub use admin::configure_admin_routes;
pub use auth::configure_auth_routes;
pub use files::configure_file_routes;
pub use student::configure_student_routes;
pub use system::configure_system_routes;
pub use teacher::configure_teacher_routes;
