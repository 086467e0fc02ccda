pub mod json;
pub mod md;

use crate::error::TypecodeError;
use crate::types::report::{QuizReport, ScoreReport};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_score(report: &ScoreReport, format: OutputFormat) -> Result<String, TypecodeError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(TypecodeError::Json),
        OutputFormat::Md => Ok(md::score_markdown(report)),
    }
}

pub fn render_quiz(report: &QuizReport, format: OutputFormat) -> Result<String, TypecodeError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(TypecodeError::Json),
        OutputFormat::Md => Ok(md::quiz_markdown(report)),
    }
}
