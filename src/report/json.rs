use serde::Serialize;

pub fn to_json<T: Serialize>(report: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::axis::Letter;
    use crate::types::profile::ProfileTable;
    use crate::types::report::ScoreReport;
    use crate::types::scoring::{AxisScore, TypeCode};

    #[test]
    fn json_report_contains_type_code_and_letter_scores() {
        let mut scores = AxisScore::default();
        scores.add(Letter::I, 4);
        let type_code: TypeCode = "ISTJ".parse().expect("code should parse");
        let report = ScoreReport {
            project: "survey".to_string(),
            type_code,
            profile: ProfileTable::default().describe(&type_code),
            scores,
            percentages: crate::score::percentages(&scores),
            answered: 2,
            total_questions: 2,
            missing: vec![],
        };

        let rendered = to_json(&report).expect("json should serialize");
        assert!(rendered.contains("\"type_code\": \"ISTJ\""));
        assert!(rendered.contains("\"I\": 4"));
        assert!(rendered.contains("\"name\": \"Logistician\""));
    }
}
