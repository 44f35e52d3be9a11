use crate::errors::MetAromaticError;
use crate::residues::ResidueExt;
use pdbtbx::*;
use polars::prelude::*;
use std::{path::Path, sync::mpsc, thread, time::Duration};

/// Open an atomic data file with [`pdbtbx::ReadOptions`] and remove non-protein residues.
pub fn load_model(input_file: &str) -> Result<(PDB, Vec<PDBError>), MetAromaticError> {
    // Load file as complex structure
    let (mut pdb, errors) = pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)
        .map_err(|errs| MetAromaticError::StructureLoad {
            structure: input_file.to_string(),
            reason: errs
                .iter()
                .map(|e| e.short_description().to_string())
                .collect::<Vec<_>>()
                .join("; "),
        })?;

    // Remove non-protein residues from model
    pdb.remove_residues_by(|res| res.resn().is_none());

    Ok((pdb, errors))
}

/// Run [`load_model`] on a helper thread and give up after `timeout`.
///
/// The reader thread is detached on timeout and its result discarded.
pub fn load_model_with_timeout(
    input_file: &str,
    timeout: Duration,
) -> Result<(PDB, Vec<PDBError>), MetAromaticError> {
    let (tx, rx) = mpsc::channel();
    let path = input_file.to_string();
    thread::spawn(move || {
        // The receiver may be gone after a timeout
        let _ = tx.send(load_model(&path));
    });

    match rx.recv_timeout(timeout) {
        Ok(res) => res,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(MetAromaticError::StructureLoad {
            structure: input_file.to_string(),
            reason: format!("timed out after {}s", timeout.as_secs_f64()),
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(MetAromaticError::StructureLoad {
            structure: input_file.to_string(),
            reason: "reader thread exited without a result".to_string(),
        }),
    }
}

/// Read structure identifiers from a worklist, one per line.
///
/// Blank lines and lines containing `$` are skipped.
pub fn read_worklist(path: &Path) -> Result<Vec<String>, MetAromaticError> {
    let content = std::fs::read_to_string(path).map_err(|e| MetAromaticError::StructureLoad {
        structure: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains('$'))
        .map(String::from)
        .collect())
}

/// Run `f` inside a dedicated rayon pool. `0` uses all available cores.
pub fn run_with_threads<F, R>(num_threads: usize, f: F) -> Result<R, MetAromaticError>
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| MetAromaticError::InvalidSettings(format!("thread pool: {e}")))?;
    Ok(pool.install(f))
}

/// Write a DataFrame to a file, replacing the extension with the file type's suffix.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<(), MetAromaticError> {
    let out_path = file_path.with_extension(file_type.to_string());
    let to_err = |reason: String| MetAromaticError::Output {
        path: out_path.display().to_string(),
        reason,
    };

    let mut file = std::fs::File::create(&out_path).map_err(|e| to_err(e.to_string()))?;
    match file_type {
        DataFrameFileType::Csv => CsvWriter::new(&mut file).finish(df).map(|_| ()),
        DataFrameFileType::Parquet => ParquetWriter::new(&mut file).finish(df).map(|_| ()),
        DataFrameFileType::Json => JsonWriter::new(&mut file)
            .with_json_format(JsonFormat::Json)
            .finish(df),
        DataFrameFileType::NDJson => JsonWriter::new(&mut file)
            .with_json_format(JsonFormat::JsonLines)
            .finish(df),
    }
    .map_err(|e| to_err(e.to_string()))
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}
