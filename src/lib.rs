//! Scoring for four-axis personality questionnaires and grading for
//! multiple-choice knowledge quizzes, driven by a layered TOML question bank.

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod quiz;
pub mod report;
pub mod score;
pub mod types;
