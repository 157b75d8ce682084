use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 单题作答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct AttemptAnswer {
    pub answer: String,
    pub score: f64,
    pub is_correct: Option<bool>,
    #[serde(default)]
    pub manually_graded: bool,
}

impl AttemptAnswer {
    /// 已自动判分或已人工批改
    pub fn is_graded(&self) -> bool {
        self.manually_graded || self.is_correct.is_some()
    }
}

// 批改状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub enum GradingStatus {
    Ungraded,
    PartiallyGraded,
    FullyGraded,
}

impl GradingStatus {
    /// 由各题的批改情况推导整体状态；没有任何题被批改时沿用 `fallback`
    pub fn from_answers(answers: &[AttemptAnswer], fallback: GradingStatus) -> Self {
        if !answers.is_empty() && answers.iter().all(AttemptAnswer::is_graded) {
            GradingStatus::FullyGraded
        } else if answers.iter().any(AttemptAnswer::is_graded) {
            GradingStatus::PartiallyGraded
        } else {
            fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradingStatus::Ungraded => "ungraded",
            GradingStatus::PartiallyGraded => "partially_graded",
            GradingStatus::FullyGraded => "fully_graded",
        }
    }
}

impl std::fmt::Display for GradingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GradingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ungraded" => Ok(GradingStatus::Ungraded),
            "partially_graded" => Ok(GradingStatus::PartiallyGraded),
            "fully_graded" => Ok(GradingStatus::FullyGraded),
            _ => Err(format!("Invalid grading status: {s}")),
        }
    }
}

// 考试答卷
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct ExamAttempt {
    pub id: i64,
    pub exam_id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub answers: Vec<AttemptAnswer>,
    pub total_score: f64,
    pub grading_status: GradingStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(is_correct: Option<bool>, manually_graded: bool) -> AttemptAnswer {
        AttemptAnswer {
            answer: String::new(),
            score: 0.0,
            is_correct,
            manually_graded,
        }
    }

    #[test]
    fn test_status_from_answers() {
        let all = [answer(Some(true), false), answer(None, true)];
        assert_eq!(
            GradingStatus::from_answers(&all, GradingStatus::Ungraded),
            GradingStatus::FullyGraded
        );

        let some = [answer(Some(false), false), answer(None, false)];
        assert_eq!(
            GradingStatus::from_answers(&some, GradingStatus::Ungraded),
            GradingStatus::PartiallyGraded
        );

        let none = [answer(None, false)];
        assert_eq!(
            GradingStatus::from_answers(&none, GradingStatus::Ungraded),
            GradingStatus::Ungraded
        );
    }

    #[test]
    fn test_status_round_trips_through_storage_string() {
        for status in [
            GradingStatus::Ungraded,
            GradingStatus::PartiallyGraded,
            GradingStatus::FullyGraded,
        ] {
            assert_eq!(status.as_str().parse::<GradingStatus>(), Ok(status));
        }
    }
}
