// Defaults for the cli args.
pub const DEFAULT_SAMPLE_RATE: f64 = 48000.0;
pub const DEFAULT_MAX_FREQUENCY: f64 = 1000.0;
pub const DEFAULT_FFT_SIZE: usize = 1024;
pub const DEFAULT_WIDTH: u32 = 4000;
pub const DEFAULT_HEIGHT: u32 = 1000;
pub const DEFAULT_TITLE: &str = "Log-Scaled Spectrogram with Logarithmic Frequency Axis";

// Constants that make sense as constants.
pub const COLORBAR_LABEL: &str = "Log Amplitude";
pub const X_DESC: &str = "Time Frames";
pub const Y_DESC: &str = "Frequency (Hz)";
pub const COLORBAR_WIDTH: u32 = 160;
pub const COLORBAR_STEPS: usize = 256;
