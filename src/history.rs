use crate::error::{Result, TypecodeError};
use crate::types::report::ScoreReport;
use crate::types::scoring::{AxisScore, TypeCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// One saved personality result, stored as a JSON line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub recorded_at: String,
    pub project: String,
    pub type_code: TypeCode,
    pub scores: AxisScore,
    pub bank_digest: String,
}

impl ResultRecord {
    pub fn from_report(report: &ScoreReport, bank_digest: &str) -> Self {
        Self {
            recorded_at: Utc::now().to_rfc3339(),
            project: report.project.clone(),
            type_code: report.type_code,
            scores: report.scores,
            bank_digest: bank_digest.to_string(),
        }
    }
}

pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(root: &Path, relative: &str) -> Self {
        Self {
            path: root.join(relative),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &ResultRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(TypecodeError::Io)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(TypecodeError::Io)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}").map_err(TypecodeError::Io)?;
        file.flush().map_err(TypecodeError::Io)?;
        tracing::info!(path = %self.path.display(), type_code = %record.type_code, "result saved");
        Ok(())
    }

    /// Saved records oldest first; `limit` keeps only the newest N.
    pub fn read(&self, limit: Option<usize>) -> Result<Vec<ResultRecord>> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(TypecodeError::Io(error)),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(TypecodeError::Io)?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str::<ResultRecord>(&line)?);
        }

        if let Some(limit) = limit {
            let skip = records.len().saturating_sub(limit);
            records = records.split_off(skip);
        }
        Ok(records)
    }
}
