use clap::{Args, Parser, Subcommand, ValueEnum};
use crate::types::quiz::MAX_QUESTION_COUNT;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "typecode",
    version,
    about = "Personality questionnaire scoring and knowledge quiz CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a personality answer file
    Score(ScoreCommand),
    /// Describe a four-letter type
    Describe(DescribeCommand),
    /// List personality questions
    Questions(QuestionsCommand),
    /// Validate the question bank
    Check(CheckCommand),
    /// Select knowledge quiz questions for a category
    Sample(SampleCommand),
    /// Grade a knowledge quiz response file
    Grade(GradeCommand),
    /// Start a review quiz over the questions a response file got wrong
    Review(ReviewCommand),
    /// List saved personality results
    History(HistoryCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    pub path: PathBuf,
    /// JSON object mapping question id to answer
    #[arg(long)]
    pub answers: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Score even when some questions are unanswered
    #[arg(long)]
    pub allow_partial: bool,
    /// Append the result to the history file
    #[arg(long)]
    pub save: bool,
}

#[derive(Args)]
pub struct DescribeCommand {
    pub code: String,
    /// Project directory whose profile overrides apply
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct QuestionsCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct CheckCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct SampleCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub category: u32,
    /// Overrides quiz.question_count
    #[arg(
        long,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(1..=MAX_QUESTION_COUNT as u64)
    )]
    pub count: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct GradeCommand {
    pub path: PathBuf,
    /// JSON file with the category and submitted answers
    #[arg(long)]
    pub responses: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ReviewCommand {
    pub path: PathBuf,
    /// JSON file with the category and submitted answers
    #[arg(long)]
    pub responses: PathBuf,
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct HistoryCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
