use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::parse_separator;

pub fn execute(input: &Path, sep: &str) -> Result<()> {
    let columns = reframe_io::read_columns(input, parse_separator(sep)?)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let mut writer = io::stdout().lock();
    for column in columns {
        writeln!(writer, "{}", column)?;
    }
    Ok(())
}
