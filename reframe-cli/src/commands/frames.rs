use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use super::load_graph;
use crate::OutputFormat;

pub fn execute(config: &Path, format: OutputFormat) -> Result<()> {
    let graph = load_graph(config, false)?;

    let mut writer = io::stdout().lock();
    match format {
        OutputFormat::Json => {
            writeln!(writer, "{}", serde_json::to_string_pretty(graph.frames())?)?;
        }
        OutputFormat::Text => {
            for frame in graph.frames() {
                writeln!(writer, "{}\t{}", frame.id, frame.name)?;
            }
        }
    }
    Ok(())
}
