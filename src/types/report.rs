use crate::types::profile::Profile;
use crate::types::scoring::{AxisPercentages, AxisScore, TypeCode};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub project: String,
    pub type_code: TypeCode,
    pub profile: Profile,
    pub scores: AxisScore,
    pub percentages: AxisPercentages,
    pub answered: usize,
    pub total_questions: usize,
    pub missing: Vec<u32>,
}

impl ScoreReport {
    pub fn is_partial(&self) -> bool {
        !self.missing.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IncorrectItem {
    pub question_id: u32,
    pub question_text: String,
    pub chosen_text: String,
    pub correct_text: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizReport {
    pub session_key: String,
    pub category: String,
    pub total_questions: usize,
    pub correct_count: usize,
    pub accuracy_rate: f64,
    pub completed_at: Option<String>,
    pub evaluation: String,
    pub incorrect: Vec<IncorrectItem>,
    pub review_question_ids: Vec<u32>,
    pub share_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub blocking: bool,
}
