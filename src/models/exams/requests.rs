use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Question, QuestionKind};
use crate::errors::EduPortalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    PhotoAnswer,
}

/// 题目输入：字段都是可选的，通过 `TryFrom` 校验为 [`Question`]
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct QuestionInput {
    pub text: String,
    #[serde(rename = "type", default = "default_question_type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: Option<String>,
    pub points: Option<f64>,
}

fn default_question_type() -> QuestionType {
    QuestionType::MultipleChoice
}

impl TryFrom<QuestionInput> for Question {
    type Error = EduPortalError;

    fn try_from(input: QuestionInput) -> Result<Self, Self::Error> {
        let text = input.text.trim().to_string();
        if text.is_empty() {
            return Err(EduPortalError::validation("Question text is required"));
        }

        let points = input.points.unwrap_or(1.0);
        if !points.is_finite() || points < 0.0 {
            return Err(EduPortalError::validation(
                "Question points must be a non-negative number",
            ));
        }

        let correct_answer = input
            .correct_answer
            .map(|answer| answer.trim().to_string())
            .filter(|answer| !answer.is_empty());

        let kind = match input.question_type {
            QuestionType::MultipleChoice => {
                let options: Vec<String> = input
                    .options
                    .into_iter()
                    .map(|option| option.trim().to_string())
                    .filter(|option| !option.is_empty())
                    .collect();
                if options.is_empty() {
                    return Err(EduPortalError::validation(
                        "Multiple choice questions must have options",
                    ));
                }
                let correct_answer = correct_answer.ok_or_else(|| {
                    EduPortalError::validation(
                        "Multiple choice questions must have a correct answer",
                    )
                })?;
                QuestionKind::MultipleChoice {
                    options,
                    correct_answer,
                }
            }
            QuestionType::TrueFalse => QuestionKind::TrueFalse {
                correct_answer: correct_answer.ok_or_else(|| {
                    EduPortalError::validation("True/false questions must have a correct answer")
                })?,
            },
            // 照片作答题忽略选项和标准答案
            QuestionType::PhotoAnswer => QuestionKind::PhotoAnswer,
        };

        Ok(Question { text, points, kind })
    }
}

// 创建考试请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<QuestionInput>,
    pub duration: i32,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
}

// 更新考试请求（题目创建后不可修改）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpdateExamRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// 校验通过、准备写入存储层的考试
#[derive(Debug, Clone)]
pub struct NewExam {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub duration: i32,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub total_points: f64,
}

/// 考试的元数据变更
#[derive(Debug, Clone)]
pub struct ExamChanges {
    pub title: String,
    pub description: Option<String>,
    pub duration: i32,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(question_type: QuestionType) -> QuestionInput {
        QuestionInput {
            text: "Question".to_string(),
            question_type,
            options: vec![],
            correct_answer: None,
            points: None,
        }
    }

    #[test]
    fn test_multiple_choice_requires_options_and_answer() {
        let err = Question::try_from(input(QuestionType::MultipleChoice)).unwrap_err();
        assert!(err.message().contains("options"));

        let mut with_options = input(QuestionType::MultipleChoice);
        with_options.options = vec!["a".to_string(), "b".to_string()];
        let err = Question::try_from(with_options.clone()).unwrap_err();
        assert!(err.message().contains("correct answer"));

        with_options.correct_answer = Some("a".to_string());
        let question = Question::try_from(with_options).unwrap();
        assert_eq!(question.points, 1.0);
        assert_eq!(question.kind.correct_answer(), Some("a"));
    }

    #[test]
    fn test_true_false_requires_answer() {
        assert!(Question::try_from(input(QuestionType::TrueFalse)).is_err());
        let mut tf = input(QuestionType::TrueFalse);
        tf.correct_answer = Some("true".to_string());
        assert!(Question::try_from(tf).is_ok());
    }

    #[test]
    fn test_photo_answer_drops_options_and_answer() {
        let mut photo = input(QuestionType::PhotoAnswer);
        photo.options = vec!["ignored".to_string()];
        photo.correct_answer = Some("ignored".to_string());
        photo.points = Some(5.0);
        let question = Question::try_from(photo).unwrap();
        assert_eq!(question.kind, QuestionKind::PhotoAnswer);
        assert_eq!(question.points, 5.0);
    }

    #[test]
    fn test_rejects_negative_points_and_empty_text() {
        let mut negative = input(QuestionType::PhotoAnswer);
        negative.points = Some(-1.0);
        assert!(Question::try_from(negative).is_err());

        let mut empty = input(QuestionType::PhotoAnswer);
        empty.text = "   ".to_string();
        assert!(Question::try_from(empty).is_err());
    }

    #[test]
    fn test_question_type_defaults_to_multiple_choice() {
        let parsed: QuestionInput =
            serde_json::from_str(r#"{"text":"q","options":["x"],"correct_answer":"x"}"#).unwrap();
        assert_eq!(parsed.question_type, QuestionType::MultipleChoice);
    }
}
