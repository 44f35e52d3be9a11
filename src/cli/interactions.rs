use super::{DetectionArgs, InputArgs, OutputArgs};
use clap::Parser;
use metaromatic::settings::{BridgeSettings, CHAIN_DISTANCE_CUTOFF};
use metaromatic::sink::interactions_to_df;
use metaromatic::{Stage, StructureReport};
use tracing::{debug, error, info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    detection: DetectionArgs,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("interactions"))]
    filename: String,
}

pub(crate) fn run(args: &Args) {
    trace!("{args:?}");

    let settings = args.detection.to_settings(
        BridgeSettings::default(),
        CHAIN_DISTANCE_CUTOFF,
        args.input.timeout,
    );
    let outcome = match args.input.run(&settings, Stage::Detection) {
        Some(outcome) => outcome,
        None => return,
    };

    let reports: Vec<StructureReport> = outcome.reports().cloned().collect();
    let df = match interactions_to_df(&reports) {
        Ok(df) => df,
        Err(e) => {
            error!("Failed to build the interaction table: {e}");
            return;
        }
    };
    info!("Found {} Met-aromatic interactions", df.height());
    debug!("{df}");

    args.output.save(df, &args.filename);
}
