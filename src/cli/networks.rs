use super::{BridgeArgs, DetectionArgs, InputArgs, OutputArgs};
use clap::Parser;
use metaromatic::{ResultSink, Stage, TableSink};
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
    #[arg(short = 'f', long = "filename", default_value_t = String::from("relationships"))]
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

    let mut sink = TableSink::new();
    for report in outcome.reports().filter(|r| r.has_result()) {
        sink.accept(report);
    }

    let (df, df_summary, df_ec) = match (sink.to_df(), sink.summary_df(), sink.ec_class_df()) {
        (Ok(df), Ok(summary), Ok(ec)) => (df, summary, ec),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            error!("Failed to build the relationship tables: {e}");
            return;
        }
    };
    debug!("{df}");
    info!("Classified {} chain-bridge pairs\n{}", sink.len(), df_summary);

    args.output.save(df, &args.filename);
    args.output
        .save(df_summary, &format!("{}_summary", args.filename));
    debug!("{df_ec}");
    args.output.save(df_ec, &format!("{}_ec", args.filename));
}
