pub(crate) mod bridges;
pub(crate) mod interactions;
pub(crate) mod networks;

use metaromatic::settings::{
    BridgeSettings, InteractionSettings, ANGLE_CUTOFF, BRIDGE_ORDER, CHAIN_DISTANCE_CUTOFF,
    CHAIN_IDENTIFIER, DISTANCE_CUTOFF, LOAD_TIMEOUT_SECS,
};
use metaromatic::structure::ResidueKind;
use metaromatic::{
    read_worklist, run_batch, run_detection, write_df_to_file, BatchOutcome, DataFrameFileType,
    LonePairMethod, PdbFileProvider, RingPoints, Settings, Stage,
};
use polars::prelude::DataFrame;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Where structures come from and how many to process at once.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct InputArgs {
    /// Paths to PDB or mmCIF files, or identifiers looked up in `--pdb-dir`
    #[arg(short, long, num_args = 1..)]
    input: Vec<String>,

    /// Text file listing one structure per line; lines containing '$' are skipped
    #[arg(short = 'l', long)]
    worklist: Option<PathBuf>,

    /// Directory holding <id>.pdb, <id>.cif, or <id>.ent files
    #[arg(short = 'p', long = "pdb-dir")]
    pdb_dir: Option<PathBuf>,

    /// Number of threads to use for parallel processing, 0 for all cores
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,

    /// Seconds to wait for a single structure file to load
    #[arg(long, default_value_t = LOAD_TIMEOUT_SECS)]
    timeout: u64,
}

/// Geometric criteria of the Met-aromatic algorithm.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct DetectionArgs {
    /// Chain to analyze
    #[arg(short, long, default_value_t = String::from(CHAIN_IDENTIFIER))]
    chain: String,

    /// Maximum distance between SD and an aromatic ring point (Å)
    #[arg(short, long = "distance", default_value_t = DISTANCE_CUTOFF)]
    distance_cutoff: f64,

    /// Maximum angle between a lone pair and the SD-ring vector (degrees)
    #[arg(short, long = "angle", default_value_t = ANGLE_CUTOFF)]
    angle_cutoff: f64,

    /// Lone pair model: cross product (cp) or Rodrigues rotation (rm)
    #[arg(short, long, value_enum, default_value_t = LonePairMethod::CrossProduct)]
    model: LonePairMethod,

    /// Points of the aromatic ring tested against SD
    #[arg(long = "ring-points", value_enum, default_value_t = RingPoints::Centroid)]
    ring_points: RingPoints,
}

impl InputArgs {
    /// Structure identifiers in input order: explicit inputs first, then the worklist.
    pub(crate) fn ids(&self) -> Option<Vec<String>> {
        let mut ids = self.input.clone();
        if let Some(worklist) = &self.worklist {
            match read_worklist(worklist) {
                Ok(listed) => ids.extend(listed),
                Err(e) => {
                    error!("{e}");
                    return None;
                }
            }
        }
        if ids.is_empty() {
            error!("No structures given, use --input or --worklist");
            return None;
        }
        Some(ids)
    }

    pub(crate) fn provider(&self) -> PdbFileProvider {
        PdbFileProvider::new(self.pdb_dir.clone())
    }

    /// Take every structure up to `stage`, logging and returning `None` on bad settings.
    pub(crate) fn run(&self, settings: &Settings, stage: Stage) -> Option<BatchOutcome> {
        let ids = self.ids()?;
        debug!("Processing {} structure(s)", ids.len());
        if stage == Stage::Classification && settings.bridges.order > 2 {
            warn!(
                "Bridges of order {} only use the degree rule; inverse bridges are not excluded",
                settings.bridges.order
            );
        }
        let outcome = match stage {
            Stage::Detection => run_detection(&self.provider(), &ids, settings, self.num_threads),
            Stage::Classification => run_batch(&self.provider(), &ids, settings, self.num_threads),
        };
        match outcome {
            Ok(outcome) => {
                let failed = outcome.failures().count();
                if failed > 0 {
                    warn!("{failed} of {} structure(s) failed", ids.len());
                }
                Some(outcome)
            }
            Err(e) => {
                error!("{e}");
                None
            }
        }
    }
}

impl DetectionArgs {
    pub(crate) fn to_settings(
        &self,
        bridges: BridgeSettings,
        chain_distance_cutoff: f64,
        timeout: u64,
    ) -> Settings {
        Settings {
            interactions: InteractionSettings {
                distance_cutoff: self.distance_cutoff,
                angle_cutoff: self.angle_cutoff,
                lone_pair_method: self.model,
                ring_points: self.ring_points,
            },
            bridges,
            chain_distance_cutoff,
            chain_identifier: self.chain.clone(),
            load_timeout: Duration::from_secs(timeout),
        }
    }
}

/// Bridge extraction options shared by the bridge and network commands.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct BridgeArgs {
    /// Number of aromatics a methionine must interact with to form a bridge
    #[arg(short = 'n', long = "bridge-order", default_value_t = BRIDGE_ORDER)]
    bridge_order: usize,

    /// Keep bridges and chains containing phenylalanine
    #[arg(long = "include-phe", default_value_t = false)]
    include_phe: bool,

    /// Maximum ring centroid distance between closely spaced aromatics (Å)
    #[arg(long = "chain-distance", default_value_t = CHAIN_DISTANCE_CUTOFF)]
    chain_distance_cutoff: f64,
}

impl BridgeArgs {
    pub(crate) fn bridge_settings(&self) -> BridgeSettings {
        BridgeSettings {
            order: self.bridge_order,
            excluded_kinds: match self.include_phe {
                true => vec![],
                false => vec![ResidueKind::Phe],
            },
        }
    }
}

/// Output location and format.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct OutputArgs {
    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,
}

impl OutputArgs {
    /// Write `df` to `<output>/<name>.<format>`, logging the outcome.
    pub(crate) fn save(&self, mut df: DataFrame, name: &str) {
        let output_path = match std::path::absolute(&self.output) {
            Ok(path) => path,
            Err(e) => {
                error!("Failed to resolve the output directory: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::create_dir_all(&output_path) {
            error!("Failed to create {}: {e}", output_path.display());
            return;
        }

        let output_file = output_path
            .join(name)
            .with_extension(self.output_format.to_string());
        match write_df_to_file(&mut df, &output_file, self.output_format) {
            Ok(()) => info!("Results saved to {}", output_file.display()),
            Err(e) => error!("{e}"),
        }
    }
}
