//! JSONL session reports.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use deck::{DeckSnapshot, FrameLayout};
use serde::Serialize;

use crate::errors::SimulatorError;
use crate::simulator::{SessionStats, Step, Violation};
use crate::types::Scenario;

#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub session: u32,
    pub seed: u64,
    pub scenario: Scenario,
    pub duration_ms: f64,
    pub stats: SessionStats,
    pub violations: Vec<Violation>,
    #[serde(rename = "final")]
    pub final_snapshot: DeckSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<FrameLayout>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

/// Writes one JSON object per session, to a file or stdout.
pub struct ReportWriter {
    writer: Box<dyn Write>,
    path: Option<PathBuf>,
}

impl ReportWriter {
    pub fn new(path: Option<&Path>) -> Result<Self, SimulatorError> {
        let writer: Box<dyn Write> = match path {
            Some(path) => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    std::fs::create_dir_all(dir)?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(path)?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };
        Ok(Self {
            writer,
            path: path.map(Path::to_path_buf),
        })
    }

    pub fn write_session(&mut self, report: &SessionReport) -> Result<(), SimulatorError> {
        let json = serde_json::to_string(report)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<Option<PathBuf>, SimulatorError> {
        self.writer.flush()?;
        Ok(self.path)
    }
}
