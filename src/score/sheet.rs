use crate::error::{Result, TypecodeError};
use crate::types::question::{QuestionBank, QuestionId, QuestionKind};
use crate::types::scoring::Score;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A raw answer as it arrives from outside: a number, or text that should hold one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    Number(i64),
    Text(String),
}

/// Collects answers for one respondent against a fixed bank.
///
/// Every value is checked when recorded, so the scorer only ever sees
/// in-range answers for known questions.
#[derive(Debug, Clone)]
pub struct AnswerSheet<'a> {
    bank: &'a QuestionBank,
    answers: BTreeMap<QuestionId, Score>,
}

impl<'a> AnswerSheet<'a> {
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self {
            bank,
            answers: BTreeMap::new(),
        }
    }

    /// Records (or replaces) the answer for `question_id`.
    pub fn record(&mut self, question_id: QuestionId, raw: &RawAnswer) -> Result<Score> {
        let question = self
            .bank
            .get(question_id)
            .ok_or_else(|| TypecodeError::UnknownQuestion(question_id.to_string()))?;

        let invalid = |reason: String| TypecodeError::InvalidAnswer {
            question: question_id,
            reason,
        };

        let value = match (&question.kind, raw) {
            (QuestionKind::Choice { options }, RawAnswer::Text(text)) => options
                .iter()
                .position(|option| option.label.eq_ignore_ascii_case(text.trim()))
                .map(|index| index as Score + 1)
                .map_or_else(|| parse_number(text), Ok)
                .map_err(invalid)?,
            (_, RawAnswer::Text(text)) => parse_number(text).map_err(invalid)?,
            (_, RawAnswer::Number(value)) => *value,
        };

        match &question.kind {
            QuestionKind::Scale { .. } if !self.bank.scale.contains(value) => {
                tracing::warn!(question = question_id, value, "answer outside scale");
                return Err(invalid(format!(
                    "{value} is outside {}..={}",
                    self.bank.scale.min, self.bank.scale.max
                )));
            }
            QuestionKind::Choice { options } if question.option(value).is_none() => {
                tracing::warn!(question = question_id, value, "no such option");
                return Err(invalid(format!(
                    "option {value} does not exist (1..={})",
                    options.len()
                )));
            }
            _ => {}
        }

        tracing::debug!(question = question_id, value, "answer recorded");
        self.answers.insert(question_id, value);
        Ok(value)
    }

    /// Records a batch keyed by question id as text, e.g. a decoded JSON object.
    pub fn record_all(&mut self, raw: &BTreeMap<String, RawAnswer>) -> Result<()> {
        for (key, answer) in raw {
            let question_id = key
                .trim()
                .parse::<QuestionId>()
                .map_err(|_| TypecodeError::UnknownQuestion(key.clone()))?;
            self.record(question_id, answer)?;
        }
        Ok(())
    }

    pub fn retract(&mut self, question_id: QuestionId) -> Option<Score> {
        self.answers.remove(&question_id)
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn get(&self, question_id: QuestionId) -> Option<Score> {
        self.answers.get(&question_id).copied()
    }

    /// Unanswered question ids in bank order.
    pub fn missing(&self) -> Vec<QuestionId> {
        self.bank
            .ids()
            .filter(|id| !self.answers.contains_key(id))
            .collect()
    }

    pub fn first_missing(&self) -> Option<QuestionId> {
        self.bank.ids().find(|id| !self.answers.contains_key(id))
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }

    pub fn answers(&self) -> &BTreeMap<QuestionId, Score> {
        &self.answers
    }

    /// Hands the answers over for scoring; fails while any question is unanswered.
    pub fn finish(self) -> Result<BTreeMap<QuestionId, Score>> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(TypecodeError::IncompleteAnswers(
                missing
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            ));
        }
        Ok(self.answers)
    }
}

fn parse_number(text: &str) -> std::result::Result<Score, String> {
    text.trim()
        .parse::<Score>()
        .map_err(|_| format!("'{text}' is not a number"))
}
