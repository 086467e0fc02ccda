use crate::types::axis::Axis;
use crate::types::report::{QuizReport, ScoreReport};

pub fn score_markdown(report: &ScoreReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Personality Result: {}\n\n", report.type_code));
    output.push_str(&format!(
        "**{}**: {}\n\n",
        report.profile.name, report.profile.description
    ));

    output.push_str("## Axes\n\n");
    for axis in Axis::ALL {
        let (first_label, second_label) = axis.labels();
        let share = &report.percentages.axes[axis.position()];
        output.push_str(&format!(
            "- {}: {} {} ({:.1}%) / {} {} ({:.1}%)\n",
            axis,
            first_label,
            report.scores.get(axis.first()),
            share.first,
            second_label,
            report.scores.get(axis.second()),
            share.second
        ));
    }
    output.push('\n');

    output.push_str(&format!(
        "Answered: {}/{}\n",
        report.answered, report.total_questions
    ));
    if report.is_partial() {
        output.push_str(&format!(
            "\n> partial result: unanswered question(s) {} counted as neutral\n",
            report
                .missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    output
}

pub fn quiz_markdown(report: &QuizReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Quiz Result: {}\n\n", report.category));
    output.push_str(&format!(
        "Score: {}/{} ({:.1}%)\n\n{}\n\n",
        report.correct_count, report.total_questions, report.accuracy_rate, report.evaluation
    ));

    output.push_str("## Review\n\n");
    if report.incorrect.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for item in &report.incorrect {
            output.push_str(&format!(
                "- Q{} {}\n  - your answer: {}\n  - correct: {}\n  - {}\n",
                item.question_id,
                item.question_text,
                item.chosen_text,
                item.correct_text,
                item.explanation
            ));
        }
        output.push('\n');
    }

    output.push_str("## Share\n\n");
    output.push_str(&report.share_text);
    output.push('\n');
    output
}
