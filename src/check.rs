use crate::types::axis::Axis;
use crate::types::config::TypecodeConfig;
use crate::types::question::{QuestionBank, QuestionKind};
use crate::types::quiz::QuizBank;
use crate::types::report::Finding;

pub fn check_findings(config: &TypecodeConfig) -> Vec<Finding> {
    if let Err(error) = config.validate() {
        return vec![Finding {
            id: "bank.invalid".to_string(),
            title: "Question bank is invalid".to_string(),
            body: error.to_string(),
            blocking: true,
        }];
    }

    let mut findings = Vec::new();
    if let Ok(bank) = config.question_bank() {
        findings.extend(personality_findings(&bank));
    }
    if let Ok(quiz) = config.quiz_bank() {
        findings.extend(quiz_findings(&quiz));
    }
    findings
}

fn personality_findings(bank: &QuestionBank) -> Vec<Finding> {
    if bank.is_empty() {
        return vec![Finding {
            id: "bank.empty".to_string(),
            title: "No personality questions".to_string(),
            body: "The bank defines no [[questions]]; every result resolves by tie-break."
                .to_string(),
            blocking: false,
        }];
    }

    let mut findings = Vec::new();
    for axis in Axis::ALL {
        if bank.count_on(axis) == 0 {
            findings.push(Finding {
                id: "bank.axis_uncovered".to_string(),
                title: format!("Axis {axis} has no questions"),
                body: format!(
                    "Axis {axis} always resolves by tie-break ({:?}).",
                    bank.tie_break
                ),
                blocking: false,
            });
            continue;
        }

        let directions = bank
            .questions()
            .iter()
            .filter(|question| question.axis == axis)
            .filter_map(|question| match question.kind {
                QuestionKind::Scale { direction } => Some(direction),
                QuestionKind::Choice { .. } => None,
            })
            .collect::<Vec<_>>();
        if directions.len() > 1 && directions.iter().all(|d| *d == directions[0]) {
            findings.push(Finding {
                id: "bank.axis_one_sided".to_string(),
                title: format!("Axis {axis} scale questions all favour {}", directions[0]),
                body: format!(
                    "Add reverse-keyed questions toward {} so agreeable answering does not skew the axis.",
                    directions[0].opposite()
                ),
                blocking: false,
            });
        }
    }
    findings
}

fn quiz_findings(quiz: &QuizBank) -> Vec<Finding> {
    let mut findings = Vec::new();
    for category in &quiz.categories {
        let pool = quiz.pool(category.id).len();
        if pool == 0 {
            findings.push(Finding {
                id: "quiz.empty_category".to_string(),
                title: format!("Category '{}' has no active questions", category.name),
                body: "Sessions cannot start for this category.".to_string(),
                blocking: false,
            });
        } else if pool < quiz.question_count {
            findings.push(Finding {
                id: "quiz.small_pool".to_string(),
                title: format!("Category '{}' will repeat questions", category.name),
                body: format!(
                    "{pool} active question(s) for a {}-question quiz; selection repeats questions.",
                    quiz.question_count
                ),
                blocking: false,
            });
        }
    }
    findings
}
