use anyhow::{Context, Result};
use reframe_io::{translate_csv_file, CoordinateColumns, CsvTranslateOptions};

use super::{load_graph, parse_separator};
use crate::ConvertArgs;

pub fn execute(args: &ConvertArgs) -> Result<()> {
    let delimiter = parse_separator(&args.sep)?;
    let graph = load_graph(&args.config, args.strict)?;

    let ids: Vec<_> = graph.frames().iter().map(|frame| frame.id.as_str()).collect();
    log::info!("Reference frames: {}", ids.join(", "));

    let path = graph
        .resolve(&args.source, &args.target)
        .with_context(|| format!("cannot convert from '{}' to '{}'", args.source, args.target))?;

    log::info!("Conversion path: {}", path.frames.join(" -> "));
    for step in &path.steps {
        log::debug!("> Change '{}'->'{}'", step.from, step.to);
        for transform in &step.chain {
            log::debug!("    - {}", transform);
        }
    }

    let options = CsvTranslateOptions {
        columns: CoordinateColumns {
            x: args.x.clone(),
            y: args.y.clone(),
            z: args.z.clone(),
            digits: args.digits,
        },
        delimiter,
        ..CsvTranslateOptions::default()
    };

    log::info!("Reading {}", args.input.display());
    let count = translate_csv_file(&args.input, &args.output, path.chain(), &options, args.force)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;
    log::info!("{} records written to {}", count, args.output.display());
    Ok(())
}
