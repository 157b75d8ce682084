use super::entities::AttachedFile;

/// 作业表单字段（multipart 文本字段解析而来）
#[derive(Debug, Clone, Default)]
pub struct AssignmentForm {
    pub course_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub max_score: Option<String>,
}

/// 校验通过的作业字段
#[derive(Debug, Clone)]
pub struct AssignmentFields {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub max_score: f64,
}

/// 写入存储层的作业；更新时 `pdf` 为 None 表示保留原附件
#[derive(Debug, Clone)]
pub struct AssignmentRecord {
    pub fields: AssignmentFields,
    pub pdf: Option<AttachedFile>,
}
