use typecode::error::TypecodeError;
use typecode::score::sheet::{AnswerSheet, RawAnswer};
use typecode::types::profile::ProfileTable;
use typecode::types::question::QuestionKind;
use typecode::types::quiz::QuizBank;
use typecode::types::scoring::TypeCode;
use typecode::{check, cli, config, history, quiz, report, score};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, TypecodeError> {
    if !path.exists() {
        return Err(TypecodeError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn print_session(session: &quiz::QuizSession, quiz_bank: &QuizBank, rng: &mut StdRng) {
    println!("session: {}", session.session_key);
    if let Some(parent) = &session.parent_session_key {
        println!("review of: {parent}");
    }
    println!("timer: {}s per question", session.timer_seconds);
    for (index, id) in session.question_ids.iter().enumerate() {
        let Some(question) = quiz_bank.question(*id) else {
            continue;
        };
        println!("{}. [Q{}] {}", index + 1, question.id, question.text);
        for choice in quiz::select::shuffled_choices(question, rng) {
            println!("   ({}) {}", choice.id, choice.text);
        }
    }
}

fn run() -> Result<i32, TypecodeError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let loaded = config::require_config(&cmd.path)?;
            let bank = loaded.question_bank()?;
            let profiles = ProfileTable::with_overrides(&loaded.profiles);

            let raw: BTreeMap<String, RawAnswer> = read_json(&cmd.answers)?;
            let mut sheet = AnswerSheet::new(&bank);
            sheet.record_all(&raw)?;
            let answers = if cmd.allow_partial {
                sheet.answers().clone()
            } else {
                sheet.finish()?
            };

            let scorer = score::AxisScorer::new(&bank, &profiles);
            let result = scorer.report(&loaded.project.name, &answers);
            let rendered = report::render_score(&result, output_format(&cmd.format))?;
            println!("{rendered}");

            if cmd.save {
                let log = history::HistoryLog::new(&cmd.path, loaded.history_file());
                log.append(&history::ResultRecord::from_report(&result, &bank.digest()?))?;
            }

            if result.is_partial() {
                eprintln!(
                    "warning: {} of {} question(s) unanswered",
                    result.missing.len(),
                    result.total_questions
                );
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Describe(cmd) => {
            let code: TypeCode = cmd
                .code
                .parse()
                .map_err(|_| TypecodeError::UnknownTypeCode(cmd.code.clone()))?;
            let profiles = match &cmd.path {
                Some(path) => config::load_config(path)?
                    .map(|loaded| ProfileTable::with_overrides(&loaded.profiles))
                    .unwrap_or_default(),
                None => ProfileTable::default(),
            };
            let profile = profiles.describe(&code);
            println!("{code}: {}", profile.name);
            println!("{}", profile.description);
            for letter in code.letters() {
                println!("- {}", letter.label());
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Questions(cmd) => {
            let loaded = config::require_config(&cmd.path)?;
            let bank = loaded.question_bank()?;
            if bank.is_empty() {
                println!("questions: none");
                return Ok(exit_code::WARNINGS);
            }
            for question in bank.questions() {
                match &question.kind {
                    QuestionKind::Scale { direction } => println!(
                        "{}. [{} -> {}] {} ({}..={})",
                        question.id,
                        question.axis,
                        direction,
                        question.text,
                        bank.scale.min,
                        bank.scale.max
                    ),
                    QuestionKind::Choice { options } => {
                        println!("{}. [{}] {}", question.id, question.axis, question.text);
                        for option in options {
                            println!(
                                "   {}) {} [{} +{}]",
                                option.label, option.text, option.letter, option.weight
                            );
                        }
                    }
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check(cmd) => {
            let loaded = config::require_config(&cmd.path)?;
            let findings = check::check_findings(&loaded);

            if findings.is_empty() {
                println!("check: no findings");
                return Ok(exit_code::SUCCESS);
            }

            for finding in &findings {
                let level = if finding.blocking { "BLOCKING" } else { "WARN" };
                println!("[{}] {}: {}", level, finding.id, finding.title);
                println!("  {}", finding.body);
            }

            if findings.iter().any(|finding| finding.blocking) {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Sample(cmd) => {
            let loaded = config::require_config(&cmd.path)?;
            let mut quiz_bank = loaded.quiz_bank()?;
            if let Some(count) = cmd.count {
                quiz_bank.question_count = count;
            }
            let mut rng = rng_from(cmd.seed);
            let session = quiz::QuizSession::start(&quiz_bank, cmd.category, &mut rng)?;
            print_session(&session, &quiz_bank, &mut rng);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Review(cmd) => {
            let loaded = config::require_config(&cmd.path)?;
            let quiz_bank = loaded.quiz_bank()?;
            let responses: quiz::QuizResponses = read_json(&cmd.responses)?;
            let mut rng = rng_from(cmd.seed);
            let graded = quiz::grade(&quiz_bank, &responses, &mut rng)?;
            let session = quiz::QuizSession::review(&graded, &mut rng)?;
            print_session(&session, &quiz_bank, &mut rng);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Grade(cmd) => {
            let loaded = config::require_config(&cmd.path)?;
            let quiz_bank = loaded.quiz_bank()?;
            let responses: quiz::QuizResponses = read_json(&cmd.responses)?;
            let mut rng = rng_from(None);
            let session = quiz::grade(&quiz_bank, &responses, &mut rng)?;
            let result = session.report(&quiz_bank)?;
            let rendered = report::render_quiz(&result, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::History(cmd) => {
            let loaded = config::require_config(&cmd.path)?;
            let log = history::HistoryLog::new(&cmd.path, loaded.history_file());
            let records = log.read(cmd.limit)?;
            if records.is_empty() {
                println!("history: no saved results");
                return Ok(exit_code::SUCCESS);
            }
            for record in &records {
                println!(
                    "{} {} {} bank:{}",
                    record.recorded_at,
                    record.type_code,
                    record.project,
                    record.bank_digest.get(..12).unwrap_or(&record.bank_digest)
                );
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
