//! Worklist processing across many structures.

use crate::errors::MetAromaticError;
use crate::pipeline::{analyze_residues, detect_residues, StructureReport};
use crate::provider::{LoadedStructure, StructureProvider};
use crate::settings::Settings;
use crate::sink::ResultSink;
use crate::utils::run_with_threads;

use rayon::prelude::*;
use tracing::{debug, error, info, warn};

/// Outcome of one worklist entry.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureStatus {
    Analyzed(StructureReport),
    Failed {
        structure: String,
        error: MetAromaticError,
    },
}

impl StructureStatus {
    pub fn structure(&self) -> &str {
        match self {
            StructureStatus::Analyzed(report) => &report.structure,
            StructureStatus::Failed { structure, .. } => structure,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Statuses in worklist order
    pub statuses: Vec<StructureStatus>,
}

impl BatchOutcome {
    pub fn reports(&self) -> impl Iterator<Item = &StructureReport> + '_ {
        self.statuses.iter().filter_map(|s| match s {
            StructureStatus::Analyzed(report) => Some(report),
            StructureStatus::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &MetAromaticError)> + '_ {
        self.statuses.iter().filter_map(|s| match s {
            StructureStatus::Failed { structure, error } => Some((structure.as_str(), error)),
            StructureStatus::Analyzed(_) => None,
        })
    }

    /// Feed every analyzed structure to `sink`, in worklist order.
    pub fn drain_into<S: ResultSink>(&self, sink: &mut S) {
        for report in self.reports() {
            sink.accept(report);
        }
    }
}

/// How far each structure is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Interactions only
    Detection,
    /// Interactions, bridges, chains, and their relationships
    Classification,
}

/// Analyze one structure up to `stage`, turning every failure into a status.
pub fn analyze_one<P: StructureProvider + ?Sized>(
    provider: &P,
    id: &str,
    settings: &Settings,
    stage: Stage,
) -> StructureStatus {
    let res = provider.load(id, settings).and_then(|loaded| {
        let LoadedStructure { residues, metadata } = loaded;
        let report = match stage {
            Stage::Detection => detect_residues(id, &residues, settings),
            Stage::Classification => analyze_residues(id, &residues, settings)?,
        };
        Ok(StructureReport { metadata, ..report })
    });
    match res {
        Ok(report) => StructureStatus::Analyzed(report),
        Err(error) => StructureStatus::Failed {
            structure: id.to_string(),
            error,
        },
    }
}

/// Analyze every structure of the worklist on `num_threads` threads (0 for all cores).
///
/// A failing structure is recorded and does not stop the others.
pub fn run_batch<P: StructureProvider + ?Sized>(
    provider: &P,
    ids: &[String],
    settings: &Settings,
    num_threads: usize,
) -> Result<BatchOutcome, MetAromaticError> {
    run_stage(provider, ids, settings, num_threads, Stage::Classification)
}

/// Like [`run_batch`], but only detects interactions.
///
/// Structures whose bridges or chains could not be classified keep their interactions.
pub fn run_detection<P: StructureProvider + ?Sized>(
    provider: &P,
    ids: &[String],
    settings: &Settings,
    num_threads: usize,
) -> Result<BatchOutcome, MetAromaticError> {
    run_stage(provider, ids, settings, num_threads, Stage::Detection)
}

fn run_stage<P: StructureProvider + ?Sized>(
    provider: &P,
    ids: &[String],
    settings: &Settings,
    num_threads: usize,
    stage: Stage,
) -> Result<BatchOutcome, MetAromaticError> {
    settings.validate()?;

    let statuses: Vec<StructureStatus> = run_with_threads(num_threads, || {
        debug!("Using {} thread(s)", rayon::current_num_threads());
        ids.par_iter()
            .map(|id| analyze_one(provider, id, settings, stage))
            .collect()
    })?;

    for (count, status) in statuses.iter().enumerate() {
        log_status(count + 1, status, stage);
    }
    Ok(BatchOutcome { statuses })
}

fn log_status(count: usize, status: &StructureStatus, stage: Stage) {
    match status {
        StructureStatus::Analyzed(report) if stage == Stage::Detection => info!(
            "{count}. {}: {} interactions",
            report.structure,
            report.interactions.len()
        ),
        StructureStatus::Analyzed(report) if report.has_result() => info!(
            "{count}. {}: {} interactions, {} bridges, {} chains, {} comparisons",
            report.structure,
            report.interactions.len(),
            report.bridges.len(),
            report.chains.len(),
            report.comparisons.len()
        ),
        StructureStatus::Analyzed(report) => info!(
            "{count}. {}: no result ({} interactions, {} bridges, {} chains)",
            report.structure,
            report.interactions.len(),
            report.bridges.len(),
            report.chains.len()
        ),
        StructureStatus::Failed { structure, error } => match error {
            MetAromaticError::StructureNotFound(_) => warn!("{count}. {structure}: {error}"),
            _ => error!("{count}. {structure}: {error}"),
        },
    }
}
