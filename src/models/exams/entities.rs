//! 考试与题目
//!
//! 题目类型是一个带标签的和类型：只有单选题有选项，照片作答题没有标准答案。
//! 面向学生的视图使用独立的 [`StudentQuestion`]，从类型上保证不会泄露标准答案。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        correct_answer: String,
    },
    TrueFalse {
        correct_answer: String,
    },
    PhotoAnswer,
}

impl QuestionKind {
    /// 可自动判分题目的标准答案
    pub fn correct_answer(&self) -> Option<&str> {
        match self {
            QuestionKind::MultipleChoice { correct_answer, .. }
            | QuestionKind::TrueFalse { correct_answer } => Some(correct_answer),
            QuestionKind::PhotoAnswer => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Question {
    pub text: String,
    pub points: f64,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

// 考试实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub duration: i32, // 分钟
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub total_points: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Exam {
    /// 作答窗口，两端都包含
    pub fn is_open_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }
}

/// 学生可见的题目类型（不含标准答案）
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum StudentQuestionKind {
    MultipleChoice { options: Vec<String> },
    TrueFalse,
    PhotoAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct StudentQuestion {
    pub text: String,
    pub points: f64,
    #[serde(flatten)]
    pub kind: StudentQuestionKind,
}

impl From<&Question> for StudentQuestion {
    fn from(question: &Question) -> Self {
        let kind = match &question.kind {
            QuestionKind::MultipleChoice { options, .. } => StudentQuestionKind::MultipleChoice {
                options: options.clone(),
            },
            QuestionKind::TrueFalse { .. } => StudentQuestionKind::TrueFalse,
            QuestionKind::PhotoAnswer => StudentQuestionKind::PhotoAnswer,
        };
        Self {
            text: question.text.clone(),
            points: question.points,
            kind,
        }
    }
}

/// 学生视角的考试
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct StudentExam {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<StudentQuestion>,
    pub duration: i32,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub total_points: f64,
    pub attempted: bool,
}

impl StudentExam {
    pub fn from_exam(exam: &Exam, attempted: bool) -> Self {
        Self {
            id: exam.id,
            course_id: exam.course_id,
            title: exam.title.clone(),
            description: exam.description.clone(),
            questions: exam.questions.iter().map(StudentQuestion::from).collect(),
            duration: exam.duration,
            start_date: exam.start_date,
            end_date: exam.end_date,
            total_points: exam.total_points,
            attempted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_wire_format() {
        let question = Question {
            text: "2 + 2 = ?".to_string(),
            points: 2.0,
            kind: QuestionKind::MultipleChoice {
                options: vec!["3".to_string(), "4".to_string()],
                correct_answer: "4".to_string(),
            },
        };
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["type"], "multiple-choice");
        assert_eq!(value["correct_answer"], "4");
        assert_eq!(value["options"][1], "4");
    }

    #[test]
    fn test_student_view_hides_correct_answer() {
        let questions = [
            Question {
                text: "q1".to_string(),
                points: 1.0,
                kind: QuestionKind::MultipleChoice {
                    options: vec!["a".to_string(), "b".to_string()],
                    correct_answer: "a".to_string(),
                },
            },
            Question {
                text: "q2".to_string(),
                points: 1.0,
                kind: QuestionKind::TrueFalse {
                    correct_answer: "true".to_string(),
                },
            },
            Question {
                text: "q3".to_string(),
                points: 1.0,
                kind: QuestionKind::PhotoAnswer,
            },
        ];
        for question in &questions {
            let value = serde_json::to_value(StudentQuestion::from(question)).unwrap();
            assert!(value.get("correct_answer").is_none());
            assert!(value.get("type").is_some());
        }
    }
}
