use super::{BridgeArgs, DetectionArgs, InputArgs, OutputArgs};
use clap::Parser;
use metaromatic::sink::{bridges_to_df, compositions_to_df, order_breakdown_to_df};
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

    #[command(flatten)]
    bridges: BridgeArgs,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("bridges"))]
    filename: String,
}

pub(crate) fn run(args: &Args) {
    trace!("{args:?}");

    let settings = args.detection.to_settings(
        args.bridges.bridge_settings(),
        args.bridges.chain_distance_cutoff,
        args.input.timeout,
    );
    let outcome = match args.input.run(&settings, Stage::Classification) {
        Some(outcome) => outcome,
        None => return,
    };
    let reports: Vec<StructureReport> = outcome.reports().cloned().collect();

    let tables = [
        (bridges_to_df(&reports), args.filename.clone()),
        (order_breakdown_to_df(&reports), format!("{}_orders", args.filename)),
        (compositions_to_df(&reports), format!("{}_compositions", args.filename)),
    ];
    for (df, name) in tables {
        match df {
            Ok(df) => {
                debug!("{name}\n{df}");
                args.output.save(df, &name);
            }
            Err(e) => error!("Failed to build table {name}: {e}"),
        }
    }

    let n_bridges: usize = reports.iter().map(|r| r.bridges.len()).sum();
    info!(
        "Found {n_bridges} bridge(s) of order {} in {} structure(s)",
        settings.bridges.order,
        reports.len()
    );
}
