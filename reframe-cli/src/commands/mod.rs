pub mod columns;
pub mod convert;
pub mod frames;
pub mod path;

use std::path::Path;

use anyhow::{Context, Result};
use reframe_core::{GraphBuilder, ReferenceFrameConfig, ReferenceFrameGraph};
use reframe_io::Delimiter;

/// Read an XML configuration and build its frame graph
pub fn load_graph(config: &Path, strict: bool) -> Result<ReferenceFrameGraph> {
    let decls = ReferenceFrameConfig::from_xml_file(config)
        .with_context(|| format!("failed to read configuration {}", config.display()))?;

    let mut builder = GraphBuilder::new().strict_conversions(strict);
    builder
        .add_config(&decls)
        .with_context(|| format!("invalid configuration {}", config.display()))?;
    Ok(builder.build())
}

/// `auto` means the delimiter is detected from the header line
pub fn parse_separator(sep: &str) -> Result<Option<Delimiter>> {
    if sep.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    Ok(Some(sep.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator("auto").unwrap(), None);
        assert_eq!(parse_separator(";").unwrap(), Some(Delimiter::Semicolon));
        assert_eq!(parse_separator("tab").unwrap(), Some(Delimiter::Tab));
        assert!(parse_separator(";;").is_err());
    }

    #[test]
    fn test_load_graph_strict() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<Config>
  <ReferenceFrames>
    <ReferenceFrame id="A" name="a"/>
    <ReferenceFrame id="B" name="b"/>
  </ReferenceFrames>
  <ChangesInReferenceFrames>
    <Transformation from="A" to="B"><Translation x="1"/></Transformation>
    <Transformation from="B" to="A"><Translation x="2"/></Transformation>
  </ChangesInReferenceFrames>
</Config>"#
        )
        .unwrap();

        let graph = load_graph(file.path(), false).unwrap();
        assert_eq!(graph.edge_count(), 2);

        let err = load_graph(file.path(), true).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid configuration"));
    }
}
