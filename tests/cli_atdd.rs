#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BANK: &str = r#"
[project]
name = "team-survey"

[[questions]]
id = 1
text = "I recharge by spending time with other people"
axis = "EI"
direction = "E"

[[questions]]
id = 2
text = "I prefer a quiet evening alone"
axis = "EI"
direction = "I"

[[questions]]
id = 3
text = "I trust facts over hunches"
axis = "SN"
direction = "S"

[[questions]]
id = 4
text = "I like to imagine what could be"
axis = "SN"
direction = "N"

[[questions]]
id = 5
text = "A friend asks for advice. You..."
axis = "TF"

[[questions.options]]
text = "Propose a logical fix"
letter = "T"
weight = 2

[[questions.options]]
text = "Listen and empathise"
letter = "F"
weight = 2

[[questions]]
id = 6
text = "I plan trips down to the hour"
axis = "JP"
direction = "J"

[[questions]]
id = 7
text = "I decide things on the spot"
axis = "JP"
direction = "P"

[quiz]
question_count = 2
timer_seconds = 20

[[quiz.categories]]
id = 1
name = "Networking"

[[quiz.questions]]
id = 1
category = 1
text = "Which port does HTTPS use by default?"
explanation = "HTTPS listens on 443."
choices = [
  { text = "80" },
  { text = "443", correct = true },
  { text = "22" },
]

[[quiz.questions]]
id = 2
category = 1
text = "Which layer does TCP belong to?"
explanation = "TCP is a transport-layer protocol."
choices = [
  { text = "Transport", correct = true },
  { text = "Network" },
]

[[quiz.questions]]
id = 3
category = 1
text = "What does DNS resolve?"
explanation = "DNS maps names to addresses."
choices = [
  { text = "Names to addresses", correct = true },
  { text = "Addresses to MAC addresses" },
]
"#;

const FULL_ANSWERS: &str = r#"{"1": 5, "2": 1, "3": 2, "4": 4, "5": "B", "6": 4, "7": "2"}"#;

struct Fixture {
    project: TempDir,
    home: TempDir,
}

impl Fixture {
    fn new(bank: &str) -> Self {
        let project = TempDir::new().expect("project dir should be created");
        let home = TempDir::new().expect("home dir should be created");
        fs::write(project.path().join("typecode.toml"), bank).expect("bank should write");
        Self { project, home }
    }

    fn path(&self) -> &Path {
        self.project.path()
    }

    fn write(&self, name: &str, content: &str) -> String {
        let path = self.project.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir should create");
        }
        fs::write(&path, content).expect("fixture file should write");
        path.display().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("typecode").expect("binary should compile");
        cmd.env("HOME", self.home.path()).env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn score_prints_markdown_result() {
    let fx = Fixture::new(BANK);
    let answers = fx.write("answers.json", FULL_ANSWERS);

    fx.cmd()
        .arg("score")
        .arg(fx.path())
        .arg("--answers")
        .arg(&answers)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# Personality Result: ENFJ"))
        .stdout(predicate::str::contains("Protagonist"))
        .stdout(predicate::str::contains("Answered: 7/7"));
}

#[test]
fn score_prints_json_result() {
    let fx = Fixture::new(BANK);
    let answers = fx.write("answers.json", FULL_ANSWERS);

    fx.cmd()
        .arg("score")
        .arg(fx.path())
        .arg("--answers")
        .arg(&answers)
        .arg("--format")
        .arg("json")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"type_code\": \"ENFJ\""))
        .stdout(predicate::str::contains("\"E\": 4"));
}

#[test]
fn score_rejects_incomplete_answers_by_default() {
    let fx = Fixture::new(BANK);
    let answers = fx.write("answers.json", r#"{"1": 5, "2": 1}"#);

    fx.cmd()
        .arg("score")
        .arg(fx.path())
        .arg("--answers")
        .arg(&answers)
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "answers incomplete: missing question(s) 3, 4, 5, 6, 7",
        ));
}

#[test]
fn score_allows_partial_answers_with_warning() {
    let fx = Fixture::new(BANK);
    let answers = fx.write("answers.json", r#"{"1": 5}"#);

    fx.cmd()
        .arg("score")
        .arg(fx.path())
        .arg("--answers")
        .arg(&answers)
        .arg("--allow-partial")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Personality Result: ESTJ"))
        .stderr(predicate::str::contains("6 of 7 question(s) unanswered"));
}

#[test]
fn local_override_changes_tie_break() {
    let fx = Fixture::new(BANK);
    fx.write(".typecode/local.toml", "[scoring]\ntie_break = \"second\"\n");
    let answers = fx.write("answers.json", "{}");

    fx.cmd()
        .arg("score")
        .arg(fx.path())
        .arg("--answers")
        .arg(&answers)
        .arg("--allow-partial")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Personality Result: INFP"));
}

#[test]
fn score_rejects_malformed_answer_values() {
    let fx = Fixture::new(BANK);
    let answers = fx.write("answers.json", r#"{"1": "often"}"#);

    fx.cmd()
        .arg("score")
        .arg(fx.path())
        .arg("--answers")
        .arg(&answers)
        .arg("--allow-partial")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid answer for question 1"));
}

#[test]
fn score_rejects_out_of_range_values() {
    let fx = Fixture::new(BANK);
    let answers = fx.write("answers.json", r#"{"3": 9}"#);

    fx.cmd()
        .arg("score")
        .arg(fx.path())
        .arg("--answers")
        .arg(&answers)
        .arg("--allow-partial")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("9 is outside 1..=5"));
}

#[test]
fn score_without_config_is_a_runtime_failure() {
    let fx = Fixture::new(BANK);
    let empty = TempDir::new().expect("empty dir should be created");
    let answers = fx.write("answers.json", FULL_ANSWERS);

    fx.cmd()
        .arg("score")
        .arg(empty.path())
        .arg("--answers")
        .arg(&answers)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn saved_results_appear_in_history() {
    let fx = Fixture::new(BANK);
    let answers = fx.write("answers.json", FULL_ANSWERS);

    fx.cmd()
        .arg("score")
        .arg(fx.path())
        .arg("--answers")
        .arg(&answers)
        .arg("--save")
        .assert()
        .code(0);

    assert!(fx.path().join(".typecode/history.jsonl").exists());

    fx.cmd()
        .arg("history")
        .arg(fx.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("ENFJ team-survey bank:"));
}

#[test]
fn history_is_empty_before_any_save() {
    let fx = Fixture::new(BANK);

    fx.cmd()
        .arg("history")
        .arg(fx.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("history: no saved results"));
}

#[test]
fn check_passes_for_balanced_bank() {
    let fx = Fixture::new(BANK);

    fx.cmd()
        .arg("check")
        .arg(fx.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("check: no findings"));
}

#[test]
fn check_blocks_invalid_bank() {
    let fx = Fixture::new(
        r#"
[project]
name = "broken"

[[questions]]
id = 1
text = "q"
axis = "EI"
direction = "T"
"#,
    );

    fx.cmd()
        .arg("check")
        .arg(fx.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[BLOCKING] bank.invalid"));
}

#[test]
fn questions_lists_scale_and_choice_questions() {
    let fx = Fixture::new(BANK);

    fx.cmd()
        .arg("questions")
        .arg(fx.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("4. [SN -> N]"))
        .stdout(predicate::str::contains("B) Listen and empathise [F +2]"));
}

#[test]
fn describe_uses_project_overrides() {
    let fx = Fixture::new(&format!(
        "{BANK}\n[profiles.ENFJ]\nname = \"Team Captain\"\ndescription = \"Rallies everyone.\"\n"
    ));

    fx.cmd()
        .arg("describe")
        .arg("ENFJ")
        .arg("--path")
        .arg(fx.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("ENFJ: Team Captain"));
}

#[test]
fn sample_is_reproducible_with_seed() {
    let fx = Fixture::new(BANK);
    let run = || {
        let output = fx
            .cmd()
            .arg("sample")
            .arg(fx.path())
            .arg("--category")
            .arg("1")
            .arg("--seed")
            .arg("42")
            .output()
            .expect("sample should run");
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.starts_with("session:"))
            .map(str::to_string)
            .collect::<Vec<_>>()
    };

    let first = run();
    assert_eq!(first, run());
    assert!(first.iter().any(|line| line.starts_with("1. [Q")));
    assert!(first.iter().any(|line| line.starts_with("2. [Q")));
    assert!(!first.iter().any(|line| line.starts_with("3. [Q")));
}

#[test]
fn sample_rejects_unknown_category() {
    let fx = Fixture::new(BANK);

    fx.cmd()
        .arg("sample")
        .arg(fx.path())
        .arg("--category")
        .arg("9")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown quiz category: 9"));
}

#[test]
fn grade_reports_score_and_review_items() {
    let fx = Fixture::new(BANK);
    let responses = fx.write(
        "responses.json",
        r#"{"category": 1, "answers": [
            {"question": 1, "choice": 2, "seconds": 5},
            {"question": 2, "choice": null, "seconds": 20}
        ]}"#,
    );

    fx.cmd()
        .arg("grade")
        .arg(fx.path())
        .arg("--responses")
        .arg(&responses)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Score: 1/2 (50.0%)"))
        .stdout(predicate::str::contains("your answer: No answer (time out)"))
        .stdout(predicate::str::contains("Score: 1/2 (50%)"));
}

#[test]
fn review_lists_only_missed_questions() {
    let fx = Fixture::new(BANK);
    let responses = fx.write(
        "responses.json",
        r#"{"category": 1, "answers": [
            {"question": 1, "choice": 2, "seconds": 5},
            {"question": 2, "choice": null, "seconds": 20}
        ]}"#,
    );

    fx.cmd()
        .arg("review")
        .arg(fx.path())
        .arg("--responses")
        .arg(&responses)
        .arg("--seed")
        .arg("7")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("review of: "))
        .stdout(predicate::str::contains("1. [Q2] Which layer does TCP belong to?"))
        .stdout(predicate::str::contains("2. [Q").not());
}

#[test]
fn review_of_perfect_responses_is_rejected() {
    let fx = Fixture::new(BANK);
    let responses = fx.write(
        "responses.json",
        r#"{"category": 1, "answers": [{"question": 1, "choice": 2}]}"#,
    );

    fx.cmd()
        .arg("review")
        .arg(fx.path())
        .arg("--responses")
        .arg(&responses)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nothing to review"));
}
