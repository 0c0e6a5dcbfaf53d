use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::status::UserState;

/// Counters accumulated while transforming an extract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub created_on: String,
    pub total: usize,
    pub processed: usize,
    pub states: BTreeMap<UserState, usize>,
}

impl RunSummary {
    pub fn new(created_on: impl Into<String>) -> Self {
        Self {
            created_on: created_on.into(),
            ..Self::default()
        }
    }

    pub fn record_processed(&mut self, state: UserState) {
        self.total += 1;
        self.processed += 1;
        *self.states.entry(state).or_default() += 1;
    }

    pub fn record_skipped(&mut self) {
        self.total += 1;
    }

    pub fn skipped(&self) -> usize {
        self.total - self.processed
    }

    /// Lines printed at the end of a run.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Processed {} of {} user(s).",
            self.processed, self.total
        )];
        if self.skipped() > 0 {
            lines.push(format!("Unable to process {} user(s).", self.skipped()));
        }
        lines
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Creating summary file {path:?}"))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &JsonSummary::from(self))
            .with_context(|| format!("Writing summary to {path:?}"))?;
        writer
            .flush()
            .with_context(|| format!("Flushing summary file {path:?}"))
    }
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    created_on: &'a str,
    total: usize,
    processed: usize,
    skipped: usize,
    states: &'a BTreeMap<UserState, usize>,
}

impl<'a> From<&'a RunSummary> for JsonSummary<'a> {
    fn from(summary: &'a RunSummary) -> Self {
        Self {
            created_on: &summary.created_on,
            total: summary.total,
            processed: summary.processed,
            skipped: summary.skipped(),
            states: &summary.states,
        }
    }
}
