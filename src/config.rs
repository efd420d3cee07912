use std::path::PathBuf;

use clap::{error::ErrorKind, Parser};
use image::imageops::FilterType;

/// Input directory scanned by the command line tool, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "./original";

/// Largest accepted output edge in pixels.
pub const MAX_SIZE: u32 = 16384;

/// Exit status for missing or malformed arguments.
pub const USAGE_EXIT_CODE: i32 = 1;

#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[arg(skip = PathBuf::from(DEFAULT_INPUT_DIR))]
    pub input_dir: PathBuf,

    /// Destination directory, created if missing
    pub output_dir: PathBuf,

    /// Width and height of every output image in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..=MAX_SIZE as i64))]
    pub size: u32,

    /// Corner radius in pixels
    pub border_radius: u32,

    /// Resampling filter used to stretch the source onto the canvas
    #[arg(short, long, default_value = "triangle", value_parser = parse_filter)]
    pub filter: FilterType,

    /// Number of images processed concurrently
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub jobs: usize,

    /// Draw a progress bar on stderr
    #[arg(long)]
    pub progress: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Parses the process arguments.
    ///
    /// Help and version requests exit with status 0; any other parse failure
    /// prints the usage message to stderr and exits with [`USAGE_EXIT_CODE`].
    pub fn from_args() -> Self {
        Self::try_parse().unwrap_or_else(|err| match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                std::process::exit(USAGE_EXIT_CODE)
            }
        })
    }

    /// Builds a sequential configuration with default filter and logging.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        size: u32,
        border_radius: u32,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            size,
            border_radius,
            filter: FilterType::Triangle,
            jobs: 1,
            progress: false,
            verbose: 0,
        }
    }
}

const FILTERS: [(&str, FilterType); 5] = [
    ("nearest", FilterType::Nearest),
    ("triangle", FilterType::Triangle),
    ("catmull-rom", FilterType::CatmullRom),
    ("gaussian", FilterType::Gaussian),
    ("lanczos3", FilterType::Lanczos3),
];

fn parse_filter(s: &str) -> Result<FilterType, String> {
    let name = s.to_ascii_lowercase();
    FILTERS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, filter)| *filter)
        .ok_or_else(|| {
            let supported: Vec<_> = FILTERS
                .iter()
                .map(|(name, _)| format!("`{}`", name))
                .collect();
            format!(
                "{} is not supported. Supported filters: {}",
                s,
                supported.join(", ")
            )
        })
}
