use serde::Serialize;

pub type CategoryId = u32;
pub type ChoiceId = u32;

/// Upper bound on questions per quiz session.
pub const MAX_QUESTION_COUNT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizChoice {
    pub id: ChoiceId,
    pub text: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub category: CategoryId,
    pub text: String,
    pub explanation: String,
    pub choices: Vec<QuizChoice>,
    pub active: bool,
}

impl QuizQuestion {
    pub fn correct_choice(&self) -> Option<&QuizChoice> {
        self.choices.iter().find(|choice| choice.correct)
    }

    pub fn choice(&self, id: ChoiceId) -> Option<&QuizChoice> {
        self.choices.iter().find(|choice| choice.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizBank {
    pub categories: Vec<Category>,
    pub questions: Vec<QuizQuestion>,
    pub question_count: usize,
    pub timer_seconds: u32,
}

impl QuizBank {
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn question(&self, id: u32) -> Option<&QuizQuestion> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Active question ids in a category, in bank order.
    pub fn pool(&self, category: CategoryId) -> Vec<u32> {
        self.questions
            .iter()
            .filter(|question| question.category == category && question.active)
            .map(|question| question.id)
            .collect()
    }
}
