use crate::error::TypecodeError;
use crate::types::axis::{Axis, Letter};
use crate::types::question::{ChoiceOption, Question, QuestionBank, QuestionKind, Scale};
use crate::types::quiz::{Category, QuizBank, QuizChoice, QuizQuestion, MAX_QUESTION_COUNT};
use crate::types::scoring::{Score, TieBreak, TypeCode};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_HISTORY_FILE: &str = ".typecode/history.jsonl";

/// Largest magnitude accepted for scale bounds, midpoints and option weights.
pub const SCORE_LIMIT: Score = i32::MAX as Score;

fn check_score_limit(field: &str, value: Score) -> Result<Score, TypecodeError> {
    if (-SCORE_LIMIT..=SCORE_LIMIT).contains(&value) {
        Ok(value)
    } else {
        Err(TypecodeError::InvalidBank(format!(
            "{field} ({value}) must lie within -{SCORE_LIMIT}..={SCORE_LIMIT}"
        )))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypecodeConfig {
    pub project: ProjectConfig,
    pub scoring: Option<ScoringConfig>,
    #[serde(default)]
    pub questions: Vec<QuestionConfig>,
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
    pub quiz: Option<QuizConfig>,
    pub history: Option<HistoryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub scale_min: Option<Score>,
    pub scale_max: Option<Score>,
    pub midpoint: Option<Score>,
    pub tie_break: Option<TieBreak>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionConfig {
    pub id: u32,
    pub text: String,
    pub axis: Axis,
    pub direction: Option<Letter>,
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionConfig {
    pub label: Option<String>,
    pub text: String,
    pub letter: Letter,
    #[serde(default = "default_weight")]
    pub weight: Score,
}

fn default_weight() -> Score {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    pub question_count: Option<usize>,
    pub timer_seconds: Option<u32>,
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    #[serde(default)]
    pub questions: Vec<QuizQuestionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestionConfig {
    pub id: u32,
    pub category: u32,
    pub text: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub choices: Vec<QuizChoiceConfig>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizChoiceConfig {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    pub file: Option<String>,
}

impl TypecodeConfig {
    pub fn scale(&self) -> Result<Scale, TypecodeError> {
        let defaults = Scale::default();
        let scoring = self.scoring.as_ref();
        let min = check_score_limit(
            "scoring.scale_min",
            scoring.and_then(|s| s.scale_min).unwrap_or(defaults.min),
        )?;
        let max = check_score_limit(
            "scoring.scale_max",
            scoring.and_then(|s| s.scale_max).unwrap_or(defaults.max),
        )?;
        if min >= max {
            return Err(TypecodeError::InvalidBank(format!(
                "scoring.scale_min ({min}) must be below scoring.scale_max ({max})"
            )));
        }
        let midpoint = scoring
            .and_then(|s| s.midpoint)
            .unwrap_or_else(|| min + (max - min) / 2);
        if !(min..=max).contains(&midpoint) {
            return Err(TypecodeError::InvalidBank(format!(
                "scoring.midpoint ({midpoint}) must lie within {min}..={max}"
            )));
        }
        Ok(Scale { min, max, midpoint })
    }

    pub fn tie_break(&self) -> TieBreak {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.tie_break)
            .unwrap_or_default()
    }

    pub fn history_file(&self) -> &str {
        self.history
            .as_ref()
            .and_then(|history| history.file.as_deref())
            .unwrap_or(DEFAULT_HISTORY_FILE)
    }

    pub fn question_bank(&self) -> Result<QuestionBank, TypecodeError> {
        let scale = self.scale()?;
        let mut seen = HashSet::new();
        let mut questions = Vec::with_capacity(self.questions.len());
        for raw in &self.questions {
            if !seen.insert(raw.id) {
                return Err(TypecodeError::InvalidBank(format!(
                    "duplicate question id {}",
                    raw.id
                )));
            }
            questions.push(raw.to_question()?);
        }
        Ok(QuestionBank::new(questions, scale, self.tie_break()))
    }

    pub fn quiz_bank(&self) -> Result<QuizBank, TypecodeError> {
        let Some(quiz) = &self.quiz else {
            return Ok(QuizBank {
                categories: Vec::new(),
                questions: Vec::new(),
                question_count: 10,
                timer_seconds: 30,
            });
        };

        let mut category_ids = HashSet::new();
        let categories = quiz
            .categories
            .iter()
            .map(|raw| {
                if category_ids.insert(raw.id) {
                    Ok(Category {
                        id: raw.id,
                        name: raw.name.clone(),
                    })
                } else {
                    Err(TypecodeError::InvalidBank(format!(
                        "duplicate quiz category id {}",
                        raw.id
                    )))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut question_ids = HashSet::new();
        let mut questions = Vec::with_capacity(quiz.questions.len());
        for raw in &quiz.questions {
            if !question_ids.insert(raw.id) {
                return Err(TypecodeError::InvalidBank(format!(
                    "duplicate quiz question id {}",
                    raw.id
                )));
            }
            if !category_ids.contains(&raw.category) {
                return Err(TypecodeError::InvalidBank(format!(
                    "quiz question {} references unknown category {}",
                    raw.id, raw.category
                )));
            }
            let correct = raw.choices.iter().filter(|choice| choice.correct).count();
            if raw.choices.len() < 2 || correct != 1 {
                return Err(TypecodeError::InvalidBank(format!(
                    "quiz question {} needs at least 2 choices with exactly one correct (found {} choices, {} correct)",
                    raw.id,
                    raw.choices.len(),
                    correct
                )));
            }
            questions.push(QuizQuestion {
                id: raw.id,
                category: raw.category,
                text: raw.text.clone(),
                explanation: raw.explanation.clone(),
                active: raw.active,
                choices: raw
                    .choices
                    .iter()
                    .zip(1..)
                    .map(|(choice, id)| QuizChoice {
                        id,
                        text: choice.text.clone(),
                        correct: choice.correct,
                    })
                    .collect(),
            });
        }

        let question_count = quiz.question_count.unwrap_or(10);
        if !(1..=MAX_QUESTION_COUNT).contains(&question_count) {
            return Err(TypecodeError::InvalidBank(format!(
                "quiz.question_count ({question_count}) must lie within 1..={MAX_QUESTION_COUNT}"
            )));
        }

        Ok(QuizBank {
            categories,
            questions,
            question_count,
            timer_seconds: quiz.timer_seconds.unwrap_or(30),
        })
    }

    pub fn validate(&self) -> Result<(), TypecodeError> {
        self.question_bank()?;
        self.quiz_bank()?;
        for code in self.profiles.keys() {
            code.parse::<TypeCode>().map_err(|e| {
                TypecodeError::InvalidBank(format!("profiles.{code}: {e}"))
            })?;
        }
        Ok(())
    }
}

impl QuestionConfig {
    fn to_question(&self) -> Result<Question, TypecodeError> {
        let kind = match (self.direction, self.options.is_empty()) {
            (Some(direction), true) => {
                if !self.axis.contains(direction) {
                    return Err(TypecodeError::InvalidBank(format!(
                        "question {}: direction {} is not on axis {}",
                        self.id, direction, self.axis
                    )));
                }
                QuestionKind::Scale { direction }
            }
            (None, false) => {
                let mut options = Vec::with_capacity(self.options.len());
                for (index, raw) in self.options.iter().enumerate() {
                    if !self.axis.contains(raw.letter) {
                        return Err(TypecodeError::InvalidBank(format!(
                            "question {}: option letter {} is not on axis {}",
                            self.id, raw.letter, self.axis
                        )));
                    }
                    if raw.weight < 0 {
                        return Err(TypecodeError::InvalidBank(format!(
                            "question {}: option weights must not be negative",
                            self.id
                        )));
                    }
                    check_score_limit(&format!("question {} option weight", self.id), raw.weight)?;
                    options.push(ChoiceOption {
                        label: raw.label.clone().unwrap_or_else(|| option_label(index)),
                        text: raw.text.clone(),
                        letter: raw.letter,
                        weight: raw.weight,
                    });
                }
                QuestionKind::Choice { options }
            }
            (Some(_), false) => {
                return Err(TypecodeError::InvalidBank(format!(
                    "question {}: set either direction or options, not both",
                    self.id
                )))
            }
            (None, true) => {
                return Err(TypecodeError::InvalidBank(format!(
                    "question {}: needs a direction or options",
                    self.id
                )))
            }
        };

        Ok(Question {
            id: self.id,
            text: self.text.clone(),
            axis: self.axis,
            kind,
        })
    }
}

/// "A", "B", ... for options configured without a label.
fn option_label(index: usize) -> String {
    u8::try_from(index)
        .ok()
        .filter(|offset| *offset < 26)
        .map(|offset| char::from(b'A' + offset).to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> TypecodeConfig {
        toml::from_str(raw).expect("config should parse")
    }

    #[test]
    fn scale_defaults_to_one_through_five() {
        let cfg = parse(
            r#"
[project]
name = "sample"
"#,
        );
        let scale = cfg.scale().expect("default scale should be valid");
        assert_eq!(scale, Scale::default());
        assert_eq!(cfg.tie_break(), TieBreak::First);
        assert_eq!(cfg.history_file(), DEFAULT_HISTORY_FILE);
    }

    #[test]
    fn midpoint_outside_scale_is_rejected() {
        let cfg = parse(
            r#"
[project]
name = "sample"

[scoring]
scale_min = 1
scale_max = 5
midpoint = 9
"#,
        );
        assert!(matches!(cfg.scale(), Err(TypecodeError::InvalidBank(_))));
    }

    #[test]
    fn question_bank_builds_scale_and_choice_questions() {
        let cfg = parse(
            r#"
[project]
name = "sample"

[scoring]
tie_break = "second"

[[questions]]
id = 1
text = "I recharge around people"
axis = "EI"
direction = "E"

[[questions]]
id = 2
text = "When planning a trip"
axis = "JP"

[[questions.options]]
text = "Fix the schedule"
letter = "J"
weight = 2

[[questions.options]]
text = "Decide on the spot"
letter = "P"
weight = 2
"#,
        );
        let bank = cfg.question_bank().expect("bank should build");
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.tie_break, TieBreak::Second);
        let choice = bank.get(2).expect("question 2 should exist");
        assert_eq!(choice.option(2).map(|o| o.label.as_str()), Some("B"));
    }

    #[test]
    fn direction_off_axis_is_rejected() {
        let cfg = parse(
            r#"
[project]
name = "sample"

[[questions]]
id = 1
text = "q"
axis = "EI"
direction = "S"
"#,
        );
        let err = cfg.question_bank().expect_err("bank should be rejected");
        assert!(err.to_string().contains("not on axis EI"));
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let cfg = parse(
            r#"
[project]
name = "sample"

[[questions]]
id = 1
text = "q"
axis = "EI"
direction = "E"

[[questions]]
id = 1
text = "q again"
axis = "SN"
direction = "N"
"#,
        );
        assert!(matches!(
            cfg.question_bank(),
            Err(TypecodeError::InvalidBank(_))
        ));
    }

    #[test]
    fn quiz_question_needs_exactly_one_correct_choice() {
        let cfg = parse(
            r#"
[project]
name = "sample"

[[quiz.categories]]
id = 1
name = "Networking"

[[quiz.questions]]
id = 10
category = 1
text = "Which layer does TCP live on?"
choices = [
  { text = "Transport", correct = true },
  { text = "Session", correct = true },
]
"#,
        );
        let err = cfg.quiz_bank().expect_err("quiz bank should be rejected");
        assert!(err.to_string().contains("exactly one correct"));
    }

    #[test]
    fn unknown_profile_code_fails_validation() {
        let cfg = parse(
            r#"
[project]
name = "sample"

[profiles.XYZW]
name = "Nobody"
description = "Not a type"
"#,
        );
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn extreme_scale_bounds_are_rejected() {
        let cfg = parse(
            r#"
[project]
name = "sample"

[scoring]
scale_min = -9223372036854775807
scale_max = 9223372036854775807
"#,
        );
        let err = cfg.scale().expect_err("scale should be rejected");
        assert!(err.to_string().contains("scoring.scale_min"));
    }

    #[test]
    fn widest_allowed_scale_computes_midpoint() {
        let cfg = parse(&format!(
            "[project]\nname = \"sample\"\n\n[scoring]\nscale_min = -{SCORE_LIMIT}\nscale_max = {SCORE_LIMIT}\n"
        ));
        let scale = cfg.scale().expect("scale should be valid");
        assert_eq!(scale.midpoint, 0);
    }

    #[test]
    fn huge_option_weight_is_rejected() {
        let cfg = parse(
            r#"
[project]
name = "sample"

[[questions]]
id = 1
text = "At a party"
axis = "EI"

[[questions.options]]
text = "Work the room"
letter = "E"
weight = 9223372036854775807

[[questions.options]]
text = "Find a quiet corner"
letter = "I"
"#,
        );
        let err = cfg.question_bank().expect_err("bank should be rejected");
        assert!(err.to_string().contains("question 1 option weight"));
    }

    #[test]
    fn question_count_above_limit_is_rejected() {
        let cfg = parse(&format!(
            "[project]\nname = \"sample\"\n\n[quiz]\nquestion_count = {}\n",
            MAX_QUESTION_COUNT + 1
        ));
        let err = cfg.quiz_bank().expect_err("quiz bank should be rejected");
        assert!(err.to_string().contains("quiz.question_count"));
    }
}
