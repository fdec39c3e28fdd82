use std::{io::IsTerminal as _, path::PathBuf, process::ExitCode};

use clap::{Arg, ArgAction, CommandFactory as _, FromArgMatches as _, Parser, ValueEnum};
use tracing::Level;

/// Convert a transparent image into SVG.
/// The color information is stored as JPEG.
/// The transparency is stored as a greyscale mask.
#[derive(Parser, Debug)]
#[command(name = "transpeg", version, disable_version_flag = true)]
struct Cli {
    /// Input file, usually PNG.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Mask type.
    #[arg(short = 'm', long, value_name = "TYPE", value_enum, default_value_t = MaskChoice::Jpeg)]
    mask_type: MaskChoice,

    /// Use a PNG palette with this number of colors for the mask (PNG masks only, 0 disables
    /// the palette) [default: 8].
    #[arg(
        short = 'c',
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(0..=i64::from(transpeg::MAX_MASK_COLORS))
    )]
    mask_colors: Option<u16>,

    /// Colored JPEG output quality.
    #[arg(
        short = 'q',
        long,
        value_name = "Q",
        default_value_t = transpeg::DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    quality: u8,

    /// JPEG mask output quality (JPEG masks only) [default: 75].
    #[arg(
        short = 'y',
        long,
        value_name = "Q",
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    mask_quality: Option<u8>,

    /// Compress with gzip.
    #[arg(short = 'z', long)]
    svgz: bool,

    /// Log every pipeline stage to stderr.
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MaskChoice {
    Png,
    Jpeg,
}

fn main() -> ExitCode {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli);
    match transpeg::convert_file(&cli.input, &cli.output, &config) {
        Ok(report) => {
            eprintln!("JPEG size: {}", report.color_text_len);
            eprintln!("Mask size: {}", report.mask_text_len);
            eprintln!(
                "Overall compression ratio: {:.2}",
                report.compression_ratio()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "conversion failed");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

// `-v` prints the version, so clap's built-in `-V` flag is replaced.
fn parse_cli() -> Cli {
    let matches = Cli::command()
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::Version)
                .help("Print version"),
        )
        .get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn resolve_config(cli: &Cli) -> transpeg::EncodingConfig {
    let mask_type = match cli.mask_type {
        MaskChoice::Png => transpeg::MaskType::Png,
        MaskChoice::Jpeg => transpeg::MaskType::Jpeg,
    };

    match mask_type {
        transpeg::MaskType::Jpeg if cli.mask_colors.is_some() => {
            tracing::warn!("--mask-colors only applies to PNG masks; ignoring it");
        }
        transpeg::MaskType::Png if cli.mask_quality.is_some() => {
            tracing::warn!("--mask-quality only applies to JPEG masks; ignoring it");
        }
        _ => {}
    }

    transpeg::EncodingConfig::default()
        .with_mask_type(mask_type)
        .with_mask_colors(cli.mask_colors.unwrap_or(transpeg::DEFAULT_MASK_COLORS))
        .with_quality(cli.quality)
        .with_mask_quality(cli.mask_quality.unwrap_or(transpeg::DEFAULT_QUALITY))
        .with_svgz(cli.svgz)
}
