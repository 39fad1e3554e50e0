use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use reframe_core::ResolvedPath;

use super::load_graph;
use crate::OutputFormat;

pub fn execute(
    config: &Path,
    source: &str,
    target: &str,
    format: OutputFormat,
    strict: bool,
) -> Result<()> {
    let graph = load_graph(config, strict)?;
    let path = graph
        .resolve(source, target)
        .with_context(|| format!("cannot convert from '{}' to '{}'", source, target))?;

    let mut writer = io::stdout().lock();
    match format {
        OutputFormat::Json => {
            writeln!(writer, "{}", serde_json::to_string_pretty(&path)?)?;
        }
        OutputFormat::Text => write_path(&path, &mut writer)?,
    }
    Ok(())
}

fn write_path<W: Write>(path: &ResolvedPath, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", path.frames.join(" -> "))?;
    for step in &path.steps {
        writeln!(writer, "> Change '{}'->'{}'", step.from, step.to)?;
        for transform in &step.chain {
            writeln!(writer, "    - {}", transform)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reframe_core::{ConversionDecl, FrameDecl, ReferenceFrameConfig, ReferenceFrameGraph, Transform};

    #[test]
    fn test_write_path() {
        let config = ReferenceFrameConfig::new()
            .with_frame(FrameDecl::new("A", "a"))
            .with_frame(FrameDecl::new("B", "b"))
            .with_conversion(
                ConversionDecl::new("A", "B")
                    .then((&Transform::translation(1.0, 2.0, 0.0)).into()),
            );
        let graph = ReferenceFrameGraph::build(&config).unwrap();
        let path = graph.resolve("B", "A").unwrap();

        let mut out = Vec::new();
        write_path(&path, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "B -> A");
        assert_eq!(lines[1], "> Change 'B'->'A'");
        assert!(lines[2].starts_with("    - Translation"), "{}", text);
    }
}
