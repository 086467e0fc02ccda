pub mod select;

use crate::error::{Result, TypecodeError};
use crate::types::quiz::{CategoryId, ChoiceId, QuizBank, MAX_QUESTION_COUNT};
use crate::types::report::{IncorrectItem, QuizReport};
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

const SESSION_KEY_LEN: usize = 43;

#[derive(Debug, Clone, Serialize)]
pub struct RecordedAnswer {
    pub question_id: u32,
    pub choice_id: Option<ChoiceId>,
    pub correct: bool,
    pub time_spent_seconds: u32,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub explanation: String,
    pub correct_choice_id: Option<ChoiceId>,
}

/// One run through a category of the knowledge quiz.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSession {
    pub session_key: String,
    pub category: CategoryId,
    pub question_ids: Vec<u32>,
    pub timer_seconds: u32,
    pub review_mode: bool,
    pub parent_session_key: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    answers: Vec<RecordedAnswer>,
}

impl QuizSession {
    /// Starts a session over a random selection from the category's active questions.
    pub fn start<R: Rng>(bank: &QuizBank, category: CategoryId, rng: &mut R) -> Result<Self> {
        if bank.category(category).is_none() {
            return Err(TypecodeError::UnknownCategory(category));
        }
        if !(1..=MAX_QUESTION_COUNT).contains(&bank.question_count) {
            return Err(TypecodeError::InvalidBank(format!(
                "question count ({}) must lie within 1..={MAX_QUESTION_COUNT}",
                bank.question_count
            )));
        }
        let pool = bank.pool(category);
        let question_ids = select::select_questions(&pool, bank.question_count, rng);
        if question_ids.is_empty() {
            return Err(TypecodeError::EmptyPool(category));
        }
        Ok(Self::with_questions(
            category,
            question_ids,
            bank.timer_seconds,
            rng,
        ))
    }

    /// Starts a session over a fixed question list.
    pub fn with_questions<R: Rng>(
        category: CategoryId,
        question_ids: Vec<u32>,
        timer_seconds: u32,
        rng: &mut R,
    ) -> Self {
        let session = Self {
            session_key: session_key(rng),
            category,
            question_ids,
            timer_seconds,
            review_mode: false,
            parent_session_key: None,
            started_at: Utc::now(),
            completed_at: None,
            answers: Vec::new(),
        };
        tracing::info!(
            category,
            questions = session.question_ids.len(),
            "quiz session started"
        );
        session
    }

    /// Starts a review session over the questions `parent` got wrong.
    pub fn review<R: Rng>(parent: &QuizSession, rng: &mut R) -> Result<Self> {
        let question_ids = parent.review_question_ids();
        if question_ids.is_empty() {
            return Err(TypecodeError::NothingToReview(parent.session_key.clone()));
        }
        let mut session =
            Self::with_questions(parent.category, question_ids, parent.timer_seconds, rng);
        session.review_mode = true;
        session.parent_session_key = Some(parent.session_key.clone());
        Ok(session)
    }

    /// The id of question `number`, counting from 1.
    pub fn question_at(&self, number: usize) -> Option<u32> {
        number
            .checked_sub(1)
            .and_then(|index| self.question_ids.get(index))
            .copied()
    }

    /// Records an answer. `choice = None` means time ran out and counts as wrong.
    pub fn submit(
        &mut self,
        bank: &QuizBank,
        question_id: u32,
        choice: Option<ChoiceId>,
        time_spent_seconds: u32,
    ) -> Result<AnswerOutcome> {
        if !self.question_ids.contains(&question_id) {
            return Err(TypecodeError::UnknownQuestion(question_id.to_string()));
        }
        let question = bank
            .question(question_id)
            .ok_or_else(|| TypecodeError::UnknownQuestion(question_id.to_string()))?;

        let correct = choice
            .and_then(|id| question.choice(id))
            .map(|selected| selected.correct)
            .unwrap_or(false);

        self.answers.push(RecordedAnswer {
            question_id,
            choice_id: choice,
            correct,
            time_spent_seconds,
            answered_at: Utc::now(),
        });
        tracing::debug!(question = question_id, correct, "quiz answer submitted");

        Ok(AnswerOutcome {
            correct,
            explanation: question.explanation.clone(),
            correct_choice_id: question.correct_choice().map(|choice| choice.id),
        })
    }

    /// Marks the session finished; later calls keep the first timestamp.
    pub fn complete(&mut self) {
        if self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn answers(&self) -> &[RecordedAnswer] {
        &self.answers
    }

    pub fn total_questions(&self) -> usize {
        self.question_ids.len()
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.correct).count()
    }

    pub fn accuracy_rate(&self) -> f64 {
        let total = self.total_questions();
        if total == 0 {
            return 0.0;
        }
        let rate = self.correct_count() as f64 / total as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }

    pub fn review_question_ids(&self) -> Vec<u32> {
        self.answers
            .iter()
            .filter(|answer| !answer.correct)
            .map(|answer| answer.question_id)
            .collect()
    }

    pub fn report(&self, bank: &QuizBank) -> Result<QuizReport> {
        let category = bank
            .category(self.category)
            .ok_or(TypecodeError::UnknownCategory(self.category))?;

        let mut incorrect = Vec::new();
        for answer in self.answers.iter().filter(|answer| !answer.correct) {
            let question = bank
                .question(answer.question_id)
                .ok_or_else(|| TypecodeError::UnknownQuestion(answer.question_id.to_string()))?;
            let chosen_text = answer
                .choice_id
                .and_then(|id| question.choice(id))
                .map(|choice| choice.text.clone())
                .unwrap_or_else(|| "No answer (time out)".to_string());
            incorrect.push(IncorrectItem {
                question_id: question.id,
                question_text: question.text.clone(),
                chosen_text,
                correct_text: question
                    .correct_choice()
                    .map(|choice| choice.text.clone())
                    .unwrap_or_default(),
                explanation: question.explanation.clone(),
            });
        }

        let accuracy_rate = self.accuracy_rate();
        Ok(QuizReport {
            session_key: self.session_key.clone(),
            category: category.name.clone(),
            total_questions: self.total_questions(),
            correct_count: self.correct_count(),
            accuracy_rate,
            completed_at: self.completed_at.map(|at| at.to_rfc3339()),
            evaluation: evaluation_message(accuracy_rate).to_string(),
            incorrect,
            review_question_ids: self.review_question_ids(),
            share_text: share_text(
                &category.name,
                self.correct_count(),
                self.total_questions(),
                accuracy_rate,
            ),
        })
    }
}

/// A finished quiz run as submitted from outside.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizResponses {
    pub category: CategoryId,
    pub answers: Vec<ResponseEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEntry {
    pub question: u32,
    pub choice: Option<ChoiceId>,
    #[serde(default)]
    pub seconds: u32,
}

/// Replays submitted responses through a session and completes it.
pub fn grade<R: Rng>(bank: &QuizBank, responses: &QuizResponses, rng: &mut R) -> Result<QuizSession> {
    if bank.category(responses.category).is_none() {
        return Err(TypecodeError::UnknownCategory(responses.category));
    }
    let question_ids = responses
        .answers
        .iter()
        .map(|entry| entry.question)
        .collect::<Vec<_>>();
    let mut session =
        QuizSession::with_questions(responses.category, question_ids, bank.timer_seconds, rng);
    for entry in &responses.answers {
        let question = bank
            .question(entry.question)
            .ok_or_else(|| TypecodeError::UnknownQuestion(entry.question.to_string()))?;
        if question.category != responses.category {
            return Err(TypecodeError::UnknownQuestion(format!(
                "{} (not in category {})",
                entry.question, responses.category
            )));
        }
        session.submit(bank, entry.question, entry.choice, entry.seconds)?;
    }
    session.complete();
    Ok(session)
}

fn session_key<R: Rng>(rng: &mut R) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(SESSION_KEY_LEN)
        .map(char::from)
        .collect()
}

pub fn evaluation_message(accuracy_rate: f64) -> &'static str {
    if accuracy_rate >= 100.0 {
        "Perfect! You answered every question correctly."
    } else if accuracy_rate >= 80.0 {
        "Excellent! You understand this material well."
    } else if accuracy_rate >= 60.0 {
        "Good result! You are close to a perfect score."
    } else if accuracy_rate >= 40.0 {
        "Not bad. Review the explanations to deepen your understanding."
    } else {
        "Keep going! Try again in review mode."
    }
}

pub fn share_text(category: &str, correct: usize, total: usize, accuracy_rate: f64) -> String {
    format!(
        "[Quiz result]\nCategory: {category}\nScore: {correct}/{total} ({}%)\n#ITQuiz",
        accuracy_rate.trunc() as i64
    )
}
