use crate::constants::{
    DEFAULT_FFT_SIZE, DEFAULT_HEIGHT, DEFAULT_MAX_FREQUENCY, DEFAULT_SAMPLE_RATE, DEFAULT_TITLE,
    DEFAULT_WIDTH,
};
use clap::{
    builder::{PossibleValuesParser, TypedValueParser as _},
    Args, Parser, ValueHint,
};
use log::Level;
use std::path::PathBuf;

/// Logging options.
#[derive(Args, Clone, Debug)]
pub struct LoggingOpt {
    /// The logging level to use.
    #[arg(
        short, long, default_value_t = Level::Info,
        // Needed because enum is foreign so can't use ValueEnum derive.
        value_parser = PossibleValuesParser::new(["trace", "debug", "info", "warn", "error"]).map(|s| s.parse::<Level>().unwrap()),
        ignore_case = true
    )]
    pub log_level: Level,
}

#[derive(Args, Clone, Debug)]
pub struct FileInOpt {
    /// The input file.
    #[arg(value_hint = ValueHint::FilePath)]
    pub in_file: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct FileOutOpt {
    /// The output file.
    #[arg(value_hint = ValueHint::FilePath)]
    pub out_file: PathBuf,
}

/// Which part of the spectrum to keep.
#[derive(Args, Clone, Debug, PartialEq)]
pub struct BandOpt {
    /// The sample rate in hertz of the audio the spectrogram was computed from.
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: f64,

    /// The highest frequency in hertz to plot.
    #[arg(short, long, default_value_t = DEFAULT_MAX_FREQUENCY)]
    pub max_frequency: f64,
}

impl Default for BandOpt {
    fn default() -> Self {
        BandOpt {
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_frequency: DEFAULT_MAX_FREQUENCY,
        }
    }
}

/// Appearance of the rendered image.
#[derive(Args, Clone, Debug, PartialEq)]
pub struct RenderOpt {
    /// Image width in pixels.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Title drawn above the spectrogram.
    #[arg(short, long, default_value_t = String::from(DEFAULT_TITLE))]
    pub title: String,
}

impl Default for RenderOpt {
    fn default() -> Self {
        RenderOpt {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_owned(),
        }
    }
}

/// Plot a comma separated spectrogram (one row per time frame, one column per frequency bin)
/// on a logarithmic frequency axis. Writes svg if the output ends in `.svg`, otherwise png.
#[derive(Parser, Clone, Debug)]
#[command(version)]
pub struct PlotCli {
    #[command(flatten)]
    pub log_opt: LoggingOpt,

    #[command(flatten)]
    pub file_in: FileInOpt,

    #[command(flatten)]
    pub file_out: FileOutOpt,

    #[command(flatten)]
    pub band: BandOpt,

    #[command(flatten)]
    pub render: RenderOpt,
}

/// Compute the magnitude spectrogram of the first channel of a wav file and save it as comma separated values.
#[derive(Parser, Clone, Debug)]
#[command(version)]
pub struct WavToCsvCli {
    #[command(flatten)]
    pub log_opt: LoggingOpt,

    #[command(flatten)]
    pub file_in: FileInOpt,

    #[command(flatten)]
    pub file_out: FileOutOpt,

    /// Samples per fft window. Successive windows overlap by half.
    #[arg(short, long, default_value_t = DEFAULT_FFT_SIZE)]
    pub fft_size: usize,
}
