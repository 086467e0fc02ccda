use crate::error::Result;
use crate::types::axis::{Axis, Letter};
use crate::types::scoring::{Score, TieBreak};
use serde::Serialize;
use sha2::{Digest, Sha256};

pub type QuestionId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scale {
    pub min: Score,
    pub max: Score,
    pub midpoint: Score,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            min: 1,
            max: 5,
            midpoint: 3,
        }
    }
}

impl Scale {
    pub fn contains(&self, value: Score) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub label: String,
    pub text: String,
    pub letter: Letter,
    pub weight: Score,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QuestionKind {
    /// Answered on the bank's scale; a high answer favours `direction`.
    Scale { direction: Letter },
    /// Answered by picking one option (1-based).
    Choice { options: Vec<ChoiceOption> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub axis: Axis,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn scale(id: QuestionId, text: &str, direction: Letter) -> Self {
        Self {
            id,
            text: text.to_string(),
            axis: direction.axis(),
            kind: QuestionKind::Scale { direction },
        }
    }

    pub fn choice(id: QuestionId, text: &str, axis: Axis, options: Vec<ChoiceOption>) -> Self {
        Self {
            id,
            text: text.to_string(),
            axis,
            kind: QuestionKind::Choice { options },
        }
    }

    /// A reverse question is one whose high answers favour the axis's second pole.
    pub fn is_reverse(&self) -> bool {
        match &self.kind {
            QuestionKind::Scale { direction } => *direction == self.axis.second(),
            QuestionKind::Choice { .. } => false,
        }
    }

    pub fn option(&self, value: Score) -> Option<&ChoiceOption> {
        match &self.kind {
            QuestionKind::Choice { options } => usize::try_from(value)
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| options.get(index)),
            QuestionKind::Scale { .. } => None,
        }
    }
}

/// The immutable set of personality questions plus the rules used to score them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
    pub scale: Scale,
    pub tie_break: TieBreak,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, scale: Scale, tie_break: TieBreak) -> Self {
        Self {
            questions,
            scale,
            tie_break,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.questions.iter().map(|question| question.id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn count_on(&self, axis: Axis) -> usize {
        self.questions
            .iter()
            .filter(|question| question.axis == axis)
            .count()
    }

    /// SHA-256 over the bank's JSON form; identifies the bank version behind a result.
    pub fn digest(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&bytes);
        Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }
}
