//! 作业表单解析

use chrono::{DateTime, Utc};

use crate::errors::{EduPortalError, Result};
use crate::models::assignments::{
    entities::AttachedFile,
    requests::{AssignmentFields, AssignmentForm},
};
use crate::utils::upload::{MultipartData, StoredFile};

pub(super) const PDF_FIELD: &str = "pdf";
pub(super) const PDF_TYPES: &[&str] = &["pdf"];

impl AssignmentForm {
    pub fn from_multipart(data: &mut MultipartData) -> Self {
        Self {
            course_id: data.take_field("course_id"),
            title: data.take_field("title"),
            description: data.take_field("description"),
            due_date: data.take_field("due_date"),
            max_score: data.take_field("max_score"),
        }
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| EduPortalError::validation(format!("{name} is required")))
}

pub fn parse_form(form: &AssignmentForm) -> Result<AssignmentFields> {
    let course_id = required(&form.course_id, "course_id")?
        .parse::<i64>()
        .map_err(|_| EduPortalError::validation("course_id must be an integer"))?;
    let title = required(&form.title, "title")?.to_string();

    let max_score = required(&form.max_score, "max_score")?
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite() && *score > 0.0)
        .ok_or_else(|| EduPortalError::validation("max_score must be a positive number"))?;

    let due_date = DateTime::parse_from_rfc3339(required(&form.due_date, "due_date")?)
        .map_err(|_| EduPortalError::validation("due_date must be an RFC 3339 timestamp"))?
        .with_timezone(&Utc);

    let description = form
        .description
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    Ok(AssignmentFields {
        course_id,
        title,
        description,
        due_date,
        max_score,
    })
}

pub fn attached(file: &StoredFile, uploaded_at: DateTime<Utc>) -> AttachedFile {
    AttachedFile {
        filename: file.stored_name.clone(),
        original_name: file.original_name.clone(),
        path: file.public_path.clone(),
        uploaded_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AssignmentForm {
        AssignmentForm {
            course_id: Some("3".to_string()),
            title: Some(" Lab 1 ".to_string()),
            description: Some("".to_string()),
            due_date: Some("2026-06-01T23:59:00+08:00".to_string()),
            max_score: Some("100".to_string()),
        }
    }

    #[test]
    fn test_parse_form() {
        let fields = parse_form(&form()).unwrap();
        assert_eq!(fields.course_id, 3);
        assert_eq!(fields.title, "Lab 1");
        assert_eq!(fields.description, None);
        assert_eq!(fields.due_date.to_rfc3339(), "2026-06-01T15:59:00+00:00");
        assert_eq!(fields.max_score, 100.0);
    }

    #[test]
    fn test_parse_form_rejects_bad_values() {
        let mut bad = form();
        bad.max_score = Some("0".to_string());
        assert!(parse_form(&bad).is_err());

        let mut bad = form();
        bad.due_date = Some("tomorrow".to_string());
        assert!(parse_form(&bad).is_err());

        let mut bad = form();
        bad.title = Some("   ".to_string());
        assert!(parse_form(&bad).is_err());

        let mut bad = form();
        bad.course_id = None;
        assert!(parse_form(&bad).is_err());
    }
}
