pub mod sheet;

use crate::types::axis::{Axis, Letter};
use crate::types::profile::ProfileTable;
use crate::types::question::{Question, QuestionBank, QuestionId, QuestionKind};
use crate::types::report::ScoreReport;
use crate::types::scoring::{AxisPercentages, AxisScore, AxisShare, Score, TieBreak, TypeCode};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The letter a single answer feeds and by how much, or `None` when it contributes nothing.
pub fn contribution(question: &Question, value: Score, midpoint: Score) -> Option<(Letter, Score)> {
    match &question.kind {
        QuestionKind::Scale { direction } => {
            let delta = value.saturating_sub(midpoint);
            match delta.signum() {
                1 => Some((*direction, delta)),
                -1 => Some((direction.opposite(), delta.saturating_neg())),
                _ => None,
            }
        }
        QuestionKind::Choice { .. } => question
            .option(value)
            .filter(|option| option.weight != 0)
            .map(|option| (option.letter, option.weight)),
    }
}

/// Folds recorded answers into per-letter totals. Unanswered questions add nothing.
pub fn accumulate(answers: &BTreeMap<QuestionId, Score>, bank: &QuestionBank) -> AxisScore {
    let mut score = AxisScore::default();
    for question in bank.questions() {
        let Some(value) = answers.get(&question.id) else {
            continue;
        };
        if let Some((letter, amount)) = contribution(question, *value, bank.scale.midpoint) {
            score.add(letter, amount);
        }
    }
    score
}

pub fn determine_type(score: &AxisScore, tie_break: TieBreak) -> TypeCode {
    TypeCode::from_axis_winners(|axis| {
        match score.get(axis.first()).cmp(&score.get(axis.second())) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                tracing::debug!(%axis, ?tie_break, "axis tied");
                tie_break == TieBreak::First
            }
        }
    })
}

pub fn percentages(score: &AxisScore) -> AxisPercentages {
    AxisPercentages {
        axes: Axis::ALL.map(|axis| share(axis, score)),
    }
}

fn share(axis: Axis, score: &AxisScore) -> AxisShare {
    let first = score.get(axis.first()).max(0) as f64;
    let second = score.get(axis.second()).max(0) as f64;
    let total = first + second;
    if total == 0.0 {
        return AxisShare {
            axis,
            first: 50.0,
            second: 50.0,
        };
    }
    AxisShare {
        axis,
        first: round_one(first / total * 100.0),
        second: round_one(second / total * 100.0),
    }
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scores answers against one bank and describes the result.
pub struct AxisScorer<'a> {
    bank: &'a QuestionBank,
    profiles: &'a ProfileTable,
}

impl<'a> AxisScorer<'a> {
    pub fn new(bank: &'a QuestionBank, profiles: &'a ProfileTable) -> Self {
        Self { bank, profiles }
    }

    pub fn report(&self, project: &str, answers: &BTreeMap<QuestionId, Score>) -> ScoreReport {
        let scores = accumulate(answers, self.bank);
        let type_code = determine_type(&scores, self.bank.tie_break);
        let missing = self
            .bank
            .ids()
            .filter(|id| !answers.contains_key(id))
            .collect::<Vec<_>>();
        tracing::info!(%type_code, answered = answers.len(), missing = missing.len(), "scored answers");

        ScoreReport {
            project: project.to_string(),
            type_code,
            profile: self.profiles.describe(&type_code),
            percentages: percentages(&scores),
            scores,
            answered: self.bank.len() - missing.len(),
            total_questions: self.bank.len(),
            missing,
        }
    }
}
