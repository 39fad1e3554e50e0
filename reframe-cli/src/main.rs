use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;

mod commands;

#[derive(Parser)]
#[command(name = "reframe")]
#[command(about = "Convert surveyed coordinates between reference frames", long_about = None)]
#[command(version)]
struct Cli {
    /// Log every step of the conversion
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the coordinates of a CSV file from one frame to another
    Convert(ConvertArgs),

    /// List the reference frames of a configuration
    Frames {
        /// XML configuration file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        config: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the conversion path between two frames
    Path {
        /// XML configuration file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        config: PathBuf,

        /// Frame the coordinates are expressed in
        source: String,

        /// Frame to convert the coordinates to
        target: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Reject conversions declared twice
        #[arg(long)]
        strict: bool,
    },

    /// List the column names of a CSV file
    Columns {
        /// CSV file to inspect
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        /// Field delimiter, or "auto" to detect it from the header line
        #[arg(short, long, default_value = ";")]
        sep: String,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// CSV file to read
    #[arg(value_hint = clap::ValueHint::FilePath)]
    input: PathBuf,

    /// CSV file to write
    #[arg(value_hint = clap::ValueHint::FilePath)]
    output: PathBuf,

    /// XML configuration file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    config: PathBuf,

    /// Frame the input coordinates are expressed in
    source: String,

    /// Frame to convert the coordinates to
    target: String,

    /// Name of the x column
    #[arg(short, long, default_value = "x")]
    x: String,

    /// Name of the y column
    #[arg(short, long, default_value = "y")]
    y: String,

    /// Name of the z column, left untouched when absent
    #[arg(short, long)]
    z: Option<String>,

    /// Field delimiter, or "auto" to detect it from the header line
    #[arg(short, long, default_value = ";")]
    sep: String,

    /// Number of decimal digits written for each coordinate
    #[arg(short, long, default_value_t = 4)]
    digits: usize,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    force: bool,

    /// Reject conversions declared twice
    #[arg(long)]
    strict: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Convert(args) => commands::convert::execute(&args),

        Commands::Frames { config, format } => commands::frames::execute(&config, format),

        Commands::Path {
            config,
            source,
            target,
            format,
            strict,
        } => commands::path::execute(&config, &source, &target, format, strict),

        Commands::Columns { input, sep } => commands::columns::execute(&input, &sep),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Error: {:#}", err);
            log::error!("Execution failed because of the error above");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_defaults() {
        let cli = Cli::try_parse_from([
            "reframe", "convert", "in.csv", "out.csv", "frames.xml", "L93", "LOCAL",
        ])
        .unwrap();
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.x, "x");
        assert_eq!(args.y, "y");
        assert_eq!(args.z, None);
        assert_eq!(args.sep, ";");
        assert_eq!(args.digits, 4);
        assert!(!args.force);
        assert!(!args.strict);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_convert_options() {
        let cli = Cli::try_parse_from([
            "reframe", "-v", "convert", "in.csv", "out.csv", "frames.xml", "L93", "LOCAL", "-x",
            "E", "-y", "N", "-z", "H", "--sep", "auto", "--digits", "2", "--force",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.x, "E");
        assert_eq!(args.z.as_deref(), Some("H"));
        assert_eq!(args.sep, "auto");
        assert_eq!(args.digits, 2);
        assert!(args.force);
    }

    #[test]
    fn test_missing_frame_argument_is_rejected() {
        assert!(Cli::try_parse_from(["reframe", "convert", "in.csv", "out.csv", "frames.xml", "L93"])
            .is_err());
    }
}
